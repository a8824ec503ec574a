//! Random daily and weekly meal plans.
//!
//! Every function takes the random source explicitly so callers decide
//! between entropy and a seeded generator.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::*;

/// Uniformly pick one candidate, or `None` when there are none.
pub fn pick_random<'a, R: Rng + ?Sized>(candidates: &'a [Meal], rng: &mut R) -> Option<&'a Meal> {
    candidates.choose(rng)
}

/// Candidates grouped by the three daily slots.
struct Slots<'a> {
    breakfast: Vec<&'a Meal>,
    lunch: Vec<&'a Meal>,
    dinner: Vec<&'a Meal>,
}

impl<'a> Slots<'a> {
    fn new(meals: &'a [Meal]) -> Self {
        let mut slots = Self {
            breakfast: Vec::new(),
            lunch: Vec::new(),
            dinner: Vec::new(),
        };
        for meal in meals {
            match meal.category {
                MealCategory::Breakfast => slots.breakfast.push(meal),
                MealCategory::Lunch => slots.lunch.push(meal),
                MealCategory::Dinner => slots.dinner.push(meal),
                MealCategory::Snack => {}
            }
        }
        slots
    }

    fn pick_day<R: Rng + ?Sized>(&self, rng: &mut R) -> DayMealPlan {
        DayMealPlan {
            breakfast: self.breakfast.choose(rng).map(|m| (*m).clone()),
            lunch: self.lunch.choose(rng).map(|m| (*m).clone()),
            dinner: self.dinner.choose(rng).map(|m| (*m).clone()),
        }
    }
}

/// One breakfast, lunch and dinner picked from `meals` by category.
pub fn daily_plan<R: Rng + ?Sized>(meals: &[Meal], rng: &mut R) -> DayMealPlan {
    Slots::new(meals).pick_day(rng)
}

/// Seven independent daily picks. The same meal may appear on several days.
pub fn weekly_plan<R: Rng + ?Sized>(meals: &[Meal], rng: &mut R) -> WeeklyPlan {
    let slots = Slots::new(meals);

    WeeklyPlan {
        monday: slots.pick_day(rng),
        tuesday: slots.pick_day(rng),
        wednesday: slots.pick_day(rng),
        thursday: slots.pick_day(rng),
        friday: slots.pick_day(rng),
        saturday: slots.pick_day(rng),
        sunday: slots.pick_day(rng),
        message: WEEKLY_PLAN_MESSAGE.to_string(),
    }
}
