//! A calorie-counting meal log for the web, rendered through a small model → view → diff → patch loop.
//!
//! - [`meals`] holds the application: its [`Model`](`meals::Model`), the pure [`update`](`meals::update`) reducer and the [`view`](`meals::view`).
//! - [`vdom`] and [`diff`] describe and compare view trees without touching the DOM.
//! - [`patch`] applies patch sets to a live [`web_sys::Element`], and [`runtime`] ties everything together.

#![doc(html_root_url = "https://docs.rs/meal-log/0.0.1")]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::float_cmp, clippy::module_name_repetitions)]

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

pub mod diff;
pub mod load;
mod logging;
pub mod meals;
pub mod patch;
mod rc_hash_map;
pub mod runtime;
pub mod vdom;

pub use meals::MealLogApp;
