use super::{number::coerce_number, Intent, MealEntry, Model};
use tracing::{debug, trace};

/// Computes the model that follows `model` after `intent`.
///
/// This is pure and total: out-of-range deletions leave the meals as they are.
///
/// Calories that don't parse are recorded as NaN and *not* rejected, which makes the total NaN from then on
/// until the offending entry is deleted again.
#[must_use]
pub fn update(intent: &Intent, model: &Model) -> Model {
	trace!(kind = intent.kind(), "Updating model.");
	match intent {
		Intent::Add => {
			let meal = MealEntry::new(model.draft_meal_name.clone(), coerce_number(&model.draft_calories));
			let meals = model.meals().iter().cloned().chain(Some(meal)).collect();
			model.clone().with_meals(meals).with_drafts("", "")
		}

		Intent::Delete(index) => {
			let meals = model
				.meals()
				.iter()
				.enumerate()
				.filter(|(i, _)| i != index)
				.map(|(_, meal)| meal.clone())
				.collect();
			model.clone().with_meals(meals)
		}

		Intent::UpdateMeal(meal_name) => {
			let mut model = model.clone();
			model.draft_meal_name.clone_from(meal_name);
			model
		}

		Intent::UpdateCalories(calories) => {
			let mut model = model.clone();
			model.draft_calories.clone_from(calories);
			model
		}

		Intent::Cancel => model.clone().with_drafts("", ""),
	}
}

/// Like [`update`], but for an untyped message from a host script.
///
/// Unknown kinds leave the model unchanged.
#[must_use]
pub fn update_from_kind(kind: &str, payload: Option<&str>, model: &Model) -> Model {
	match Intent::from_kind(kind, payload) {
		Some(intent) => update(&intent, model),
		None => {
			debug!(kind, "Ignoring unrecognised intent.");
			model.clone()
		}
	}
}
