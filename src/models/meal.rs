use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub const DEFAULT_PREP_TIME: i64 = 15;
pub const DEFAULT_SERVINGS: i64 = 2;
pub const DEFAULT_DIET_TYPE: &str = "veg";
pub const DEFAULT_LIST_LIMIT: usize = 100;

/// A meal in the catalogue.
///
/// `ingredients` is free text, one ingredient per comma, semicolon or line,
/// e.g. `"2 eggs, 1 cup milk"`. It is only interpreted when a shopping list
/// is built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Meal {
    pub id: Uuid,
    pub name: String,
    pub ingredients: String,
    pub category: MealCategory,
    pub image_url: Option<String>,
    /// Preparation time in minutes.
    pub prep_time: Option<i64>,
    pub servings: Option<i64>,
    pub calories: Option<i64>,
    /// Free-form diet label such as `veg`, `non-veg`, `vegan` or `keto`.
    pub diet_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The slot of the day a meal is meant for.
///
/// Snacks are stored and listed like any other meal but are never picked
/// for a daily plan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MealCategory {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Snack => "snack",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown meal category '{0}', expected breakfast, lunch, dinner or snack")]
pub struct ParseCategoryError(pub String);

impl FromStr for MealCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(Self::Breakfast),
            "lunch" => Ok(Self::Lunch),
            "dinner" => Ok(Self::Dinner),
            "snack" => Ok(Self::Snack),
            other => Err(ParseCategoryError(other.to_string())),
        }
    }
}

impl fmt::Display for MealCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input for creating a new meal.
///
/// Omitted optional fields fall back to 15 minutes of prep time, two
/// servings and the `veg` diet label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMealInput {
    pub name: String,
    pub ingredients: String,
    pub category: MealCategory,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub prep_time: Option<i64>,
    #[serde(default)]
    pub servings: Option<i64>,
    #[serde(default)]
    pub calories: Option<i64>,
    #[serde(default)]
    pub diet_type: Option<String>,
}

impl CreateMealInput {
    /// Shorthand for the three required fields.
    pub fn new(
        name: impl Into<String>,
        ingredients: impl Into<String>,
        category: MealCategory,
    ) -> Self {
        Self {
            name: name.into(),
            ingredients: ingredients.into(),
            category,
            image_url: None,
            prep_time: None,
            servings: None,
            calories: None,
            diet_type: None,
        }
    }

    /// Build the stored meal, applying defaults for omitted fields.
    pub fn into_meal(self, id: Uuid, now: DateTime<Utc>) -> Meal {
        Meal {
            id,
            name: self.name,
            ingredients: self.ingredients,
            category: self.category,
            image_url: self.image_url,
            prep_time: self.prep_time.or(Some(DEFAULT_PREP_TIME)),
            servings: self.servings.or(Some(DEFAULT_SERVINGS)),
            calories: self.calories,
            diet_type: self
                .diet_type
                .or_else(|| Some(DEFAULT_DIET_TYPE.to_string())),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input for updating an existing meal. All fields are optional for partial updates.
///
/// Nullable fields distinguish "absent" from an explicit `null`: an absent
/// field keeps its stored value, `null` clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMealInput {
    pub name: Option<String>,
    pub ingredients: Option<String>,
    pub category: Option<MealCategory>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub prep_time: Option<Option<i64>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub servings: Option<Option<i64>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub calories: Option<Option<i64>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub diet_type: Option<Option<String>>,
}

impl UpdateMealInput {
    /// Merge into an existing meal; absent fields keep their stored value.
    pub fn apply(self, existing: Meal, now: DateTime<Utc>) -> Meal {
        Meal {
            id: existing.id,
            name: self.name.unwrap_or(existing.name),
            ingredients: self.ingredients.unwrap_or(existing.ingredients),
            category: self.category.unwrap_or(existing.category),
            image_url: self.image_url.unwrap_or(existing.image_url),
            prep_time: self.prep_time.unwrap_or(existing.prep_time),
            servings: self.servings.unwrap_or(existing.servings),
            calories: self.calories.unwrap_or(existing.calories),
            diet_type: self.diet_type.unwrap_or(existing.diet_type),
            created_at: existing.created_at,
            updated_at: now,
        }
    }
}

/// A field that was present in the input, possibly as `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Query parameters for listing meals.
///
/// Text matches are case-insensitive substring matches. A calorie bound
/// excludes meals with unknown calories.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MealFilter {
    /// Case-insensitive; an empty value means any category.
    #[serde(default, deserialize_with = "category_param")]
    pub category: Option<MealCategory>,
    /// Substring of the meal name.
    pub search: Option<String>,
    pub min_calories: Option<i64>,
    pub max_calories: Option<i64>,
    /// Diet label; `"all"` disables the filter.
    pub diet_type: Option<String>,
    /// Comma-separated substrings that must all appear in the ingredients.
    pub include_ingredients: Option<String>,
    /// Comma-separated substrings that must not appear in the ingredients.
    pub exclude_ingredients: Option<String>,
    #[serde(alias = "offset")]
    pub skip: Option<usize>,
    pub limit: Option<usize>,
}

impl MealFilter {
    pub fn matches(&self, meal: &Meal) -> bool {
        if let Some(category) = self.category {
            if meal.category != category {
                return false;
            }
        }

        if let Some(search) = &self.search {
            if !contains_ignore_case(&meal.name, search) {
                return false;
            }
        }

        if let Some(min) = self.min_calories {
            if !meal.calories.is_some_and(|c| c >= min) {
                return false;
            }
        }

        if let Some(max) = self.max_calories {
            if !meal.calories.is_some_and(|c| c <= max) {
                return false;
            }
        }

        if !diet_matches(self.diet_type.as_deref(), meal) {
            return false;
        }

        if let Some(include) = &self.include_ingredients {
            if !split_terms(include).all(|term| contains_ignore_case(&meal.ingredients, term)) {
                return false;
            }
        }

        if let Some(exclude) = &self.exclude_ingredients {
            if split_terms(exclude).any(|term| contains_ignore_case(&meal.ingredients, term)) {
                return false;
            }
        }

        true
    }

    /// Filter then paginate an already ordered list of meals.
    pub fn apply(&self, meals: impl IntoIterator<Item = Meal>) -> Vec<Meal> {
        meals
            .into_iter()
            .filter(|m| self.matches(m))
            .skip(self.skip.unwrap_or(0))
            .take(self.limit.unwrap_or(DEFAULT_LIST_LIMIT))
            .collect()
    }
}

fn category_param<'de, D>(deserializer: D) -> Result<Option<MealCategory>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => raw.parse().map(Some).map_err(de::Error::custom),
        _ => Ok(None),
    }
}

pub(crate) fn diet_matches(diet_type: Option<&str>, meal: &Meal) -> bool {
    match diet_type {
        None | Some("") | Some("all") => true,
        Some(diet) => meal.diet_type.as_deref() == Some(diet),
    }
}

fn split_terms(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|t| !t.is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
