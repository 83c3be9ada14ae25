//! The meal log: draft inputs, a table of recorded meals and a running calorie total.

mod intent;
mod model;
pub mod number;
mod update;
mod view;

pub use intent::Intent;
pub use model::{MealEntry, Model};
pub use update::{update, update_from_kind};
pub use view::*;

use crate::{
	runtime::{self, DomRuntime, Program},
	vdom::Node,
};
use core::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info};
use wasm_bindgen::prelude::*;

/// The meal log as a [`Program`] for the [`Runtime`](`crate::runtime::Runtime`).
#[derive(Debug)]
pub enum MealLog {}
impl Program for MealLog {
	type Model = Model;
	type Message = Intent;

	fn init() -> Model {
		Model::new()
	}

	fn update(message: &Intent, model: &Model) -> Model {
		update(message, model)
	}

	fn view(model: &Model) -> Node<Intent> {
		view(model)
	}
}

/// A meal log mounted into a host page.
///
/// Dropping this detaches its event handling; the rendered elements stay in place but stop responding.
#[wasm_bindgen]
pub struct MealLogApp {
	runtime: Rc<RefCell<DomRuntime<MealLog>>>,
}

#[wasm_bindgen]
impl MealLogApp {
	/// Renders a fresh meal log and appends it to `container`.
	#[wasm_bindgen(constructor)]
	#[must_use]
	pub fn new(container: web_sys::Element) -> Self {
		info!("Mounting meal log.");
		Self { runtime: runtime::mount::<MealLog>(container) }
	}

	/// Applies an untyped message like `("DELETE", "0")`. Unknown kinds are ignored.
	pub fn dispatch(&self, kind: &str, payload: Option<String>) {
		match Intent::from_kind(kind, payload.as_deref()) {
			Some(intent) => runtime::dispatch_to(&Rc::downgrade(&self.runtime), intent),
			None => debug!(kind, "Ignoring unrecognised intent."),
		}
	}

	/// `undefined` while a dispatch is in progress.
	#[wasm_bindgen(getter, js_name = totalCalories)]
	#[must_use]
	pub fn total_calories(&self) -> Option<f64> {
		runtime::inspect(&self.runtime, Model::total_calories)
	}

	/// `undefined` while a dispatch is in progress.
	#[wasm_bindgen(getter, js_name = mealCount)]
	#[must_use]
	pub fn meal_count(&self) -> Option<u32> {
		runtime::inspect(&self.runtime, |model| u32::try_from(model.meals().len()).unwrap_or(u32::MAX))
	}
}
