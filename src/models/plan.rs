use serde::{Deserialize, Serialize};

use super::meal::diet_matches;
use super::Meal;

pub const WEEKLY_PLAN_MESSAGE: &str = "Weekly meal plan generated successfully";

/// Narrows the candidate pool for random plans.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanFilter {
    /// Diet label; `"all"` disables the filter.
    pub diet_type: Option<String>,
    /// Calorie ceiling; `0` disables the filter.
    pub max_calories: Option<i64>,
}

impl PlanFilter {
    pub fn matches(&self, meal: &Meal) -> bool {
        if let Some(max) = self.max_calories.filter(|&max| max != 0) {
            if !meal.calories.is_some_and(|c| c <= max) {
                return false;
            }
        }
        diet_matches(self.diet_type.as_deref(), meal)
    }
}

/// One day's meals. A slot is `None` when no candidate exists for it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DayMealPlan {
    pub breakfast: Option<Meal>,
    pub lunch: Option<Meal>,
    pub dinner: Option<Meal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeeklyPlan {
    pub monday: DayMealPlan,
    pub tuesday: DayMealPlan,
    pub wednesday: DayMealPlan,
    pub thursday: DayMealPlan,
    pub friday: DayMealPlan,
    pub saturday: DayMealPlan,
    pub sunday: DayMealPlan,
    pub message: String,
}

impl WeeklyPlan {
    /// Days in calendar order, Monday first.
    pub fn days(&self) -> [(&'static str, &DayMealPlan); 7] {
        [
            ("monday", &self.monday),
            ("tuesday", &self.tuesday),
            ("wednesday", &self.wednesday),
            ("thursday", &self.thursday),
            ("friday", &self.friday),
            ("saturday", &self.saturday),
            ("sunday", &self.sunday),
        ]
    }
}
