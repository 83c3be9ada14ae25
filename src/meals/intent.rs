use crate::vdom::Message;

/// A user action to apply to the [`Model`](`super::Model`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Intent {
	/// Records the drafts as a new meal and clears them.
	Add,
	/// Removes the meal at the given position.
	Delete(usize),
	UpdateMeal(String),
	UpdateCalories(String),
	/// Clears both drafts.
	Cancel,
}

impl Intent {
	/// Parses an untyped message, as a host script would send it.
	///
	/// Returns [`None`] for unknown kinds and for `DELETE` without a valid index.
	/// `UPDATE_MEAL` and `UPDATE_CALORIES` treat a missing payload as empty text.
	#[must_use]
	pub fn from_kind(kind: &str, payload: Option<&str>) -> Option<Self> {
		Some(match kind {
			"ADD" => Intent::Add,
			"DELETE" => Intent::Delete(payload?.trim().parse().ok()?),
			"UPDATE_MEAL" => Intent::UpdateMeal(payload.unwrap_or_default().to_string()),
			"UPDATE_CALORIES" => Intent::UpdateCalories(payload.unwrap_or_default().to_string()),
			"CANCEL" => Intent::Cancel,
			_ => return None,
		})
	}

	#[must_use]
	pub fn kind(&self) -> &'static str {
		match self {
			Intent::Add => "ADD",
			Intent::Delete(_) => "DELETE",
			Intent::UpdateMeal(_) => "UPDATE_MEAL",
			Intent::UpdateCalories(_) => "UPDATE_CALORIES",
			Intent::Cancel => "CANCEL",
		}
	}
}

impl Message for Intent {
	fn with_value(self, value: String) -> Self {
		match self {
			Intent::UpdateMeal(_) => Intent::UpdateMeal(value),
			Intent::UpdateCalories(_) => Intent::UpdateCalories(value),
			other => other,
		}
	}
}
