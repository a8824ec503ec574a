use std::sync::{Arc, RwLock};

use anyhow::Result;
use chrono::Utc;
use uuid::Uuid;

use super::MealStore;
use crate::models::*;

/// A [`MealStore`] kept in a `Vec`, for fixtures and tests.
#[derive(Clone, Default)]
pub struct InMemoryMealStore {
    meals: Arc<RwLock<Vec<Meal>>>,
}

impl InMemoryMealStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with already built meals.
    pub fn with_meals(meals: impl IntoIterator<Item = Meal>) -> Self {
        Self {
            meals: Arc::new(RwLock::new(meals.into_iter().collect())),
        }
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Vec<Meal>>> {
        self.meals
            .read()
            .map_err(|_| anyhow::anyhow!("meal store lock poisoned"))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Vec<Meal>>> {
        self.meals
            .write()
            .map_err(|_| anyhow::anyhow!("meal store lock poisoned"))
    }
}

impl MealStore for InMemoryMealStore {
    fn get_meal(&self, id: Uuid) -> Result<Option<Meal>> {
        Ok(self.read()?.iter().find(|m| m.id == id).cloned())
    }

    fn get_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Meal>> {
        Ok(self
            .read()?
            .iter()
            .filter(|m| ids.contains(&m.id))
            .cloned()
            .collect())
    }

    fn list_filtered(&self, filter: &MealFilter) -> Result<Vec<Meal>> {
        Ok(filter.apply(self.read()?.iter().cloned()))
    }

    fn create(&self, input: CreateMealInput) -> Result<Meal> {
        let meal = input.into_meal(Uuid::new_v4(), Utc::now());
        self.write()?.push(meal.clone());
        Ok(meal)
    }

    fn update(&self, id: Uuid, input: UpdateMealInput) -> Result<Option<Meal>> {
        let mut meals = self.write()?;
        let Some(slot) = meals.iter_mut().find(|m| m.id == id) else {
            return Ok(None);
        };

        *slot = input.apply(slot.clone(), Utc::now());
        Ok(Some(slot.clone()))
    }

    fn delete(&self, id: Uuid) -> Result<bool> {
        let mut meals = self.write()?;
        let before = meals.len();
        meals.retain(|m| m.id != id);
        Ok(meals.len() < before)
    }
}
