//! Domain models for MealGenie.
//!
//! # Core Concepts
//!
//! - [`Meal`]: A stored recipe-like record with a free-text ingredient list.
//!   Meals are the only persisted entity.
//! - [`MealFilter`] / [`PlanFilter`]: Query shapes for browsing the catalogue
//!   and for narrowing the candidate pool of random plans.
//! - [`DayMealPlan`] / [`WeeklyPlan`]: Randomly assembled plans. Never stored.
//! - [`ShoppingListEntry`]: One aggregated line of a shopping list. Never stored.

mod meal;
mod plan;
mod shopping;

pub use meal::*;
pub use plan::*;
pub use shopping::*;
