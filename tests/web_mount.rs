#![cfg(target_arch = "wasm32")]

use meal_log::{
	load::load_element,
	meals::{view, Intent, MealLog},
	runtime,
	vdom::{html, Node},
	MealLogApp,
};
use std::sync::Once;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{window, Element};

wasm_bindgen_test_configure!(run_in_browser);

static LOG_INITIALIZED: Once = Once::new();

fn container() -> Element {
	LOG_INITIALIZED.call_once(tracing_wasm::set_as_global_default);

	let document = window().unwrap().document().unwrap();
	let container = document.create_element("div").unwrap();
	document.body().unwrap().append_child(&container).unwrap();
	container
}

fn loaded(container: &Element) -> Node<Intent> {
	assert_eq!(container.child_element_count(), 1);
	Node::Element(load_element(&container.first_element_child().unwrap()))
}

#[wasm_bindgen_test]
fn mount_appends_root_once() {
	let container = container();
	let runtime = runtime::mount::<MealLog>(container.clone());
	assert_eq!(loaded(&container), view(runtime.borrow().model()).structure());
	assert_eq!(runtime.borrow().patcher().root().unwrap(), &container.first_child().unwrap());
	// Save, Cancel and the two inputs.
	assert_eq!(runtime.borrow().patcher().listener_count(), 4);
}

#[wasm_bindgen_test]
fn dom_follows_dispatches() {
	let container = container();
	let runtime = runtime::mount::<MealLog>(container.clone());
	let root = container.first_child().unwrap();

	for intent in [
		Intent::UpdateMeal("Eggs".to_string()),
		Intent::UpdateCalories("200".to_string()),
		Intent::Add,
		Intent::UpdateMeal("Toast".to_string()),
		Intent::UpdateCalories("120".to_string()),
		Intent::Add,
		Intent::Delete(0),
		Intent::Delete(0),
	] {
		runtime.borrow_mut().dispatch(intent);
		assert_eq!(loaded(&container), view(runtime.borrow().model()).structure());
	}

	// Patched in place.
	assert_eq!(container.first_child().unwrap(), root);
	assert_eq!(runtime.borrow().patcher().listener_count(), 4);
	assert_eq!(container.text_content().unwrap(), "SaveCancelMealCaloriesTotal: 0 calories");
}

#[wasm_bindgen_test]
fn rows_get_and_release_listeners() {
	let container = container();
	let runtime = runtime::mount::<MealLog>(container);
	for _ in 0..3 {
		runtime.borrow_mut().dispatch(Intent::Add);
	}
	assert_eq!(runtime.borrow().patcher().listener_count(), 7);
	runtime.borrow_mut().dispatch(Intent::Delete(1));
	assert_eq!(runtime.borrow().patcher().listener_count(), 6);
}

#[wasm_bindgen_test]
fn replacing_the_root() {
	struct Swap;
	impl runtime::Program for Swap {
		type Model = bool;
		type Message = Intent;

		fn init() -> bool {
			false
		}

		fn update(_: &Intent, model: &bool) -> bool {
			!model
		}

		fn view(model: &bool) -> Node<Intent> {
			Node::Element(if *model { html::p().text("on") } else { html::div().on("click", Intent::Add).text("off") })
		}
	}

	let container = container();
	let runtime = runtime::mount::<Swap>(container.clone());
	runtime.borrow_mut().dispatch(Intent::Add);
	assert_eq!(container.child_element_count(), 1);
	assert_eq!(loaded(&container), Node::Element(html::p().text("on")));
	assert_eq!(runtime.borrow().patcher().root().unwrap(), &container.first_child().unwrap());
	assert_eq!(runtime.borrow().patcher().listener_count(), 0);
}

#[wasm_bindgen_test]
fn app_handle() {
	let container = container();
	let app = MealLogApp::new(container.clone());
	app.dispatch("UPDATE_CALORIES", Some("350".to_string()));
	app.dispatch("ADD", None);
	app.dispatch("EAT", None);
	assert_eq!(app.meal_count(), Some(1));
	assert_eq!(app.total_calories(), Some(350.0));

	let cells = container.get_elements_by_tag_name("td");
	assert_eq!(cells.item(1).unwrap().text_content().unwrap(), "350");
}
