use super::{number::format_number, Intent, MealEntry, Model};
use crate::vdom::{
	html::{button, div, img, input, p, table, tbody, td, th, thead, tr},
	Node,
};

pub const LAYOUT_STYLE: &str = "flex flex-col gap-4 items-center";
pub const ROW_STYLE: &str = "flex gap-4";
pub const INPUT_STYLE: &str = "border p-2 rounded";
pub const SAVE_BUTTON_STYLE: &str = "bg-green-500 hover:bg-green-700 text-white font-bold py-2 px-4 rounded";
pub const CANCEL_BUTTON_STYLE: &str = "bg-red-500 hover:bg-red-700 text-white font-bold py-2 px-4 rounded";
pub const TABLE_STYLE: &str = "table-auto w-full";
pub const HEADER_CELL_STYLE: &str = "px-4 py-2";
pub const CELL_STYLE: &str = "border px-4 py-2";
pub const DELETE_ICON_STYLE: &str = "w-6";
pub const TOTAL_STYLE: &str = "font-bold text-xl";

pub const DELETE_ICON_SOURCE: &str = "trash-icon.png";

/// Renders the meal log. This reads nothing but `model`.
#[must_use]
pub fn view(model: &Model) -> Node<Intent> {
	div()
		.class(LAYOUT_STYLE)
		.child(
			div()
				.class(ROW_STYLE)
				.child(
					input()
						.class(INPUT_STYLE)
						.attribute("type", "text")
						.attribute("placeholder", "Enter meal name...")
						.property("value", model.draft_meal_name.as_str())
						.on_input(Intent::UpdateMeal(String::new())),
				)
				.child(
					input()
						.class(INPUT_STYLE)
						.attribute("type", "number")
						.attribute("placeholder", "Enter calories number...")
						.property("value", model.draft_calories.as_str())
						.on_input(Intent::UpdateCalories(String::new())),
				),
		)
		.child(
			div()
				.class(ROW_STYLE)
				.child(button().class(SAVE_BUTTON_STYLE).on("click", Intent::Add).text("Save"))
				.child(button().class(CANCEL_BUTTON_STYLE).on("click", Intent::Cancel).text("Cancel")),
		)
		.child(
			table()
				.class(TABLE_STYLE)
				.child(
					thead().child(
						tr().child(th().class(HEADER_CELL_STYLE).text("Meal"))
							.child(th().class(HEADER_CELL_STYLE).text("Calories"))
							.child(th().class(HEADER_CELL_STYLE).text("")),
					),
				)
				.child(tbody().children(model.meals().iter().enumerate().map(|(index, meal)| meal_row(index, meal)))),
		)
		.child(p().class(TOTAL_STYLE).text(format!("Total: {} calories", format_number(model.total_calories()))))
		.into()
}

fn meal_row(index: usize, meal: &MealEntry) -> Node<Intent> {
	tr().child(td().class(CELL_STYLE).text(meal.name()))
		.child(td().class(CELL_STYLE).text(format_number(meal.calories())))
		.child(
			td().class(CELL_STYLE).child(
				button()
					.on("click", Intent::Delete(index))
					.child(img().attribute("src", DELETE_ICON_SOURCE).attribute("alt", "Delete").class(DELETE_ICON_STYLE)),
			),
		)
		.into()
}
