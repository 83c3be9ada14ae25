/// One recorded meal. Entries have no identity beyond their position in [`Model::meals`].
#[derive(Debug, Clone, PartialEq)]
pub struct MealEntry {
	name: String,
	calories: f64,
}
impl MealEntry {
	#[must_use]
	pub fn new(name: impl Into<String>, calories: f64) -> Self {
		Self { name: name.into(), calories }
	}

	#[must_use]
	pub fn name(&self) -> &str {
		&self.name
	}

	#[must_use]
	pub fn calories(&self) -> f64 {
		self.calories
	}
}

/// A snapshot of the meal log's state.
///
/// [`Model::total_calories`] is always the sum over [`Model::meals`]:
/// the two are private and only ever replaced together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
	/// Unsaved content of the meal name input.
	pub draft_meal_name: String,
	/// Unsaved content of the calories input, kept as text so partial input survives.
	pub draft_calories: String,
	meals: Vec<MealEntry>,
	total_calories: f64,
}
impl Model {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Replaces both drafts.
	#[must_use]
	pub fn with_drafts(self, meal_name: impl Into<String>, calories: impl Into<String>) -> Self {
		Self {
			draft_meal_name: meal_name.into(),
			draft_calories: calories.into(),
			..self
		}
	}

	/// Replaces the recorded meals, recomputing the total.
	#[must_use]
	pub fn with_meals(self, meals: Vec<MealEntry>) -> Self {
		let total_calories = meals.iter().map(MealEntry::calories).sum();
		Self { meals, total_calories, ..self }
	}

	#[must_use]
	pub fn meals(&self) -> &[MealEntry] {
		&self.meals
	}

	/// The sum of all [`MealEntry::calories`]. NaN once any entry is NaN.
	#[must_use]
	pub fn total_calories(&self) -> f64 {
		self.total_calories
	}
}
