#![cfg(target_arch = "wasm32")]

use meal_log::MealLogApp;
use std::sync::Once;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{window, Element, Event, HtmlElement, HtmlInputElement};

wasm_bindgen_test_configure!(run_in_browser);

static LOG_INITIALIZED: Once = Once::new();

fn mount() -> (Element, MealLogApp) {
	LOG_INITIALIZED.call_once(tracing_wasm::set_as_global_default);

	let document = window().unwrap().document().unwrap();
	let container = document.create_element("div").unwrap();
	document.body().unwrap().append_child(&container).unwrap();
	let app = MealLogApp::new(container.clone());
	(container, app)
}

fn inputs(container: &Element) -> (HtmlInputElement, HtmlInputElement) {
	let inputs = container.get_elements_by_tag_name("input");
	(inputs.item(0).unwrap().dyn_into().unwrap(), inputs.item(1).unwrap().dyn_into().unwrap())
}

fn buttons(container: &Element) -> Vec<HtmlElement> {
	let buttons = container.get_elements_by_tag_name("button");
	(0..buttons.length()).map(|i| buttons.item(i).unwrap().dyn_into().unwrap()).collect()
}

fn type_into(input: &HtmlInputElement, text: &str) {
	input.set_value(text);
	input.dispatch_event(&Event::new("input").unwrap()).unwrap();
}

fn total(container: &Element) -> String {
	container.get_elements_by_tag_name("p").item(0).unwrap().text_content().unwrap()
}

#[wasm_bindgen_test]
fn type_and_save() {
	let (container, app) = mount();
	let (meal, calories) = inputs(&container);

	type_into(&meal, "Oatmeal");
	type_into(&calories, "350");
	buttons(&container)[0].click();

	assert_eq!(app.meal_count(), Some(1));
	assert_eq!(total(&container), "Total: 350 calories");
	assert_eq!(meal.value(), "");
	assert_eq!(calories.value(), "");

	let cells = container.get_elements_by_tag_name("td");
	assert_eq!(cells.item(0).unwrap().text_content().unwrap(), "Oatmeal");
	assert_eq!(cells.item(1).unwrap().text_content().unwrap(), "350");
}

#[wasm_bindgen_test]
fn cancel_clears_inputs() {
	let (container, app) = mount();
	let (meal, calories) = inputs(&container);

	type_into(&meal, "Soup");
	type_into(&calories, "150");
	buttons(&container)[1].click();

	assert_eq!(meal.value(), "");
	assert_eq!(calories.value(), "");
	assert_eq!(app.meal_count(), Some(0));
	assert_eq!(total(&container), "Total: 0 calories");
}

#[wasm_bindgen_test]
fn delete_buttons_remove_their_own_row() {
	let (container, app) = mount();
	let (meal, calories) = inputs(&container);

	for (name, count) in [("Eggs", "200"), ("Toast", "120"), ("Soup", "150")] {
		type_into(&meal, name);
		type_into(&calories, count);
		buttons(&container)[0].click();
	}
	assert_eq!(total(&container), "Total: 470 calories");

	// Save, Cancel, then one delete button per row.
	buttons(&container)[2].click();
	assert_eq!(app.meal_count(), Some(2));
	assert_eq!(total(&container), "Total: 270 calories");

	buttons(&container)[2].click();
	assert_eq!(total(&container), "Total: 150 calories");
	let cells = container.get_elements_by_tag_name("td");
	assert_eq!(cells.item(0).unwrap().text_content().unwrap(), "Soup");
}
