//! Request types for MCP tools.

use rmcp::schemars::JsonSchema;
use serde::Deserialize;

use crate::models::{MealCategory, MealFilter, PlanFilter};

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ListMealsRequest {
    #[schemars(description = "Only meals of this category: breakfast, lunch, dinner or snack")]
    pub category: Option<String>,
    #[schemars(description = "Case-insensitive substring of the meal name")]
    pub search: Option<String>,
    pub min_calories: Option<i64>,
    pub max_calories: Option<i64>,
    #[schemars(description = "Diet label such as veg, non-veg, vegan or keto. 'all' disables the filter")]
    pub diet_type: Option<String>,
    #[schemars(description = "Comma-separated ingredients that must all appear")]
    pub include_ingredients: Option<String>,
    #[schemars(description = "Comma-separated ingredients that must not appear")]
    pub exclude_ingredients: Option<String>,
    #[schemars(description = "Number of matching meals to skip")]
    pub offset: Option<usize>,
    #[schemars(description = "Maximum number of meals to return (default 100)")]
    pub limit: Option<usize>,
}

impl ListMealsRequest {
    pub(super) fn into_filter(self) -> Result<MealFilter, String> {
        let category = self
            .category
            .map(|c| c.parse::<MealCategory>())
            .transpose()
            .map_err(|e| e.to_string())?;

        Ok(MealFilter {
            category,
            search: self.search,
            min_calories: self.min_calories,
            max_calories: self.max_calories,
            diet_type: self.diet_type,
            include_ingredients: self.include_ingredients,
            exclude_ingredients: self.exclude_ingredients,
            skip: self.offset,
            limit: self.limit,
        })
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetMealRequest {
    #[schemars(description = "The UUID of the meal")]
    pub meal_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateMealRequest {
    pub name: String,
    #[schemars(
        description = "Ingredients separated by commas, semicolons or newlines, e.g. '2 eggs, 1/2 cup milk'"
    )]
    pub ingredients: String,
    #[schemars(description = "breakfast, lunch, dinner or snack")]
    pub category: String,
    pub image_url: Option<String>,
    #[schemars(description = "Preparation time in minutes (default 15)")]
    pub prep_time: Option<i64>,
    #[schemars(description = "Number of servings (default 2)")]
    pub servings: Option<i64>,
    pub calories: Option<i64>,
    #[schemars(description = "Diet label (default veg)")]
    pub diet_type: Option<String>,
}

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct PlanRequest {
    #[schemars(description = "Diet label to restrict candidates to. 'all' disables the filter")]
    pub diet_type: Option<String>,
    #[schemars(description = "Skip meals above this many calories")]
    pub max_calories: Option<i64>,
}

impl From<PlanRequest> for PlanFilter {
    fn from(req: PlanRequest) -> Self {
        Self {
            diet_type: req.diet_type,
            max_calories: req.max_calories,
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ShoppingListToolRequest {
    #[schemars(description = "UUIDs of the meals to shop for. Unknown ids are ignored")]
    pub meal_ids: Vec<String>,
}
