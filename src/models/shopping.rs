use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One line of an aggregated shopping list.
///
/// `ingredient` is the normalized `unit item` key (e.g. `"cup flour"`),
/// `count` the summed quantity across every selected meal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShoppingListEntry {
    pub ingredient: String,
    pub count: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingListRequest {
    pub meal_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShoppingList {
    pub ingredients: Vec<ShoppingListEntry>,
}
