//! Meal planning operations.
//!
//! The pure parts live in [`ingredients`] (shopping-list aggregation) and
//! [`plan`] (random picks). The functions here fetch candidates from a
//! [`MealStore`] and hand them to those cores.

pub mod ingredients;
pub mod plan;

pub use ingredients::{aggregate, split_lines, HasIngredients, ParsedIngredient};
pub use plan::{daily_plan, pick_random, weekly_plan};

use anyhow::Result;
use rand::Rng;
use uuid::Uuid;

use crate::db::MealStore;
use crate::models::*;

/// Aggregate the ingredients of the given meals. Unknown ids are ignored.
pub fn shopping_list<S: MealStore + ?Sized>(store: &S, meal_ids: &[Uuid]) -> Result<ShoppingList> {
    let meals = store.get_by_ids(meal_ids)?;
    let ingredients = aggregate(&meals);

    tracing::debug!(
        requested = meal_ids.len(),
        found = meals.len(),
        entries = ingredients.len(),
        "Built shopping list"
    );

    Ok(ShoppingList { ingredients })
}

/// Random breakfast, lunch and dinner among meals matching `filter`.
pub fn random_meals<S, R>(store: &S, filter: &PlanFilter, rng: &mut R) -> Result<DayMealPlan>
where
    S: MealStore + ?Sized,
    R: Rng + ?Sized,
{
    let candidates = plan_candidates(store, filter)?;
    Ok(daily_plan(&candidates, rng))
}

/// Random plan for a whole week among meals matching `filter`.
pub fn generate_weekly_plan<S, R>(store: &S, filter: &PlanFilter, rng: &mut R) -> Result<WeeklyPlan>
where
    S: MealStore + ?Sized,
    R: Rng + ?Sized,
{
    let candidates = plan_candidates(store, filter)?;
    Ok(weekly_plan(&candidates, rng))
}

fn plan_candidates<S: MealStore + ?Sized>(store: &S, filter: &PlanFilter) -> Result<Vec<Meal>> {
    let meals = store.all_meals()?;
    Ok(meals.into_iter().filter(|m| filter.matches(m)).collect())
}
