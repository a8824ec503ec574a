mod memory;
mod schema;

pub use memory::InMemoryMealStore;

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::Result;
use chrono::Utc;
use rusqlite::{params_from_iter, Connection, Row};
use uuid::Uuid;

use crate::models::*;

/// Environment variable overriding the on-disk database location.
pub const DB_PATH_ENV: &str = "MEALGENIE_DB_PATH";

/// Storage for meals.
///
/// Planning code only talks to this trait, so it runs the same against
/// [`Database`] and [`InMemoryMealStore`].
pub trait MealStore {
    fn get_meal(&self, id: Uuid) -> Result<Option<Meal>>;

    /// Meals whose id is in `ids`, each at most once. Unknown ids are skipped.
    fn get_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Meal>>;

    /// Meals matching `filter`, in creation order, after `skip`/`limit`.
    fn list_filtered(&self, filter: &MealFilter) -> Result<Vec<Meal>>;

    fn create(&self, input: CreateMealInput) -> Result<Meal>;

    /// `None` when no meal has this id.
    fn update(&self, id: Uuid, input: UpdateMealInput) -> Result<Option<Meal>>;

    /// `false` when no meal has this id.
    fn delete(&self, id: Uuid) -> Result<bool>;

    /// Every stored meal, unpaginated.
    fn all_meals(&self) -> Result<Vec<Meal>> {
        self.list_filtered(&MealFilter {
            limit: Some(usize::MAX),
            ..Default::default()
        })
    }
}

/// SQLite-backed meal store. Cheap to clone; clones share one connection.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

const MEAL_COLUMNS: &str = "id, name, ingredients, category, image_url, prep_time, servings, \
                            calories, diet_type, created_at, updated_at";

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        tracing::info!("Opened meal database at {}", path.display());
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open the database at `$MEALGENIE_DB_PATH`, or in the platform data directory.
    pub fn open_default() -> Result<Self> {
        if let Some(path) = std::env::var_os(DB_PATH_ENV) {
            return Self::open(PathBuf::from(path));
        }

        let dirs = directories::ProjectDirs::from("", "", "mealgenie")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Self::open(dirs.data_dir().join("meals.db"))
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.lock()?;
        schema::run_migrations(&conn)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow::anyhow!("database lock poisoned"))
    }

    // ============================================================
    // Meal operations
    // ============================================================

    pub fn get_all_meals(&self) -> Result<Vec<Meal>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!("SELECT {MEAL_COLUMNS} FROM meals ORDER BY rowid"))?;

        let meals = stmt
            .query_map([], row_to_meal)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(meals)
    }

    pub fn get_meal(&self, id: Uuid) -> Result<Option<Meal>> {
        let conn = self.lock()?;
        fetch_meal(&conn, id)
    }

    pub fn get_meals_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Meal>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let conn = self.lock()?;
        let placeholders = vec!["?"; ids.len()].join(", ");
        let mut stmt = conn.prepare(&format!(
            "SELECT {MEAL_COLUMNS} FROM meals WHERE id IN ({placeholders}) ORDER BY rowid"
        ))?;

        let meals = stmt
            .query_map(params_from_iter(ids.iter().map(Uuid::to_string)), row_to_meal)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(meals)
    }

    pub fn list_meals(&self, filter: &MealFilter) -> Result<Vec<Meal>> {
        Ok(filter.apply(self.get_all_meals()?))
    }

    pub fn create_meal(&self, input: CreateMealInput) -> Result<Meal> {
        let conn = self.lock()?;
        let meal = input.into_meal(Uuid::new_v4(), Utc::now());

        conn.execute(
            &format!(
                "INSERT INTO meals ({MEAL_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
            ),
            (
                meal.id.to_string(),
                &meal.name,
                &meal.ingredients,
                meal.category.as_str(),
                &meal.image_url,
                meal.prep_time,
                meal.servings,
                meal.calories,
                &meal.diet_type,
                meal.created_at.to_rfc3339(),
                meal.updated_at.to_rfc3339(),
            ),
        )?;

        Ok(meal)
    }

    pub fn update_meal(&self, id: Uuid, input: UpdateMealInput) -> Result<Option<Meal>> {
        // Read and write under one guard; a delete cannot land in between.
        let conn = self.lock()?;
        let Some(existing) = fetch_meal(&conn, id)? else {
            return Ok(None);
        };

        let meal = input.apply(existing, Utc::now());

        let rows = conn.execute(
            "UPDATE meals SET name = ?, ingredients = ?, category = ?, image_url = ?, prep_time = ?,
                 servings = ?, calories = ?, diet_type = ?, updated_at = ?
             WHERE id = ?",
            (
                &meal.name,
                &meal.ingredients,
                meal.category.as_str(),
                &meal.image_url,
                meal.prep_time,
                meal.servings,
                meal.calories,
                &meal.diet_type,
                meal.updated_at.to_rfc3339(),
                id.to_string(),
            ),
        )?;

        Ok((rows > 0).then_some(meal))
    }

    pub fn delete_meal(&self, id: Uuid) -> Result<bool> {
        let conn = self.lock()?;
        let rows = conn.execute("DELETE FROM meals WHERE id = ?", [id.to_string()])?;
        Ok(rows > 0)
    }
}

impl MealStore for Database {
    fn get_meal(&self, id: Uuid) -> Result<Option<Meal>> {
        Database::get_meal(self, id)
    }

    fn get_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Meal>> {
        self.get_meals_by_ids(ids)
    }

    fn list_filtered(&self, filter: &MealFilter) -> Result<Vec<Meal>> {
        self.list_meals(filter)
    }

    fn create(&self, input: CreateMealInput) -> Result<Meal> {
        self.create_meal(input)
    }

    fn update(&self, id: Uuid, input: UpdateMealInput) -> Result<Option<Meal>> {
        self.update_meal(id, input)
    }

    fn delete(&self, id: Uuid) -> Result<bool> {
        self.delete_meal(id)
    }

    fn all_meals(&self) -> Result<Vec<Meal>> {
        self.get_all_meals()
    }
}

fn fetch_meal(conn: &Connection, id: Uuid) -> Result<Option<Meal>> {
    let mut stmt = conn.prepare(&format!("SELECT {MEAL_COLUMNS} FROM meals WHERE id = ?"))?;

    let mut rows = stmt.query([id.to_string()])?;
    match rows.next()? {
        Some(row) => Ok(Some(row_to_meal(row)?)),
        None => Ok(None),
    }
}

fn row_to_meal(row: &Row<'_>) -> rusqlite::Result<Meal> {
    Ok(Meal {
        id: parse_uuid(row.get::<_, String>(0)?),
        name: row.get(1)?,
        ingredients: row.get(2)?,
        category: row
            .get::<_, String>(3)?
            .parse()
            .unwrap_or(MealCategory::Snack),
        image_url: row.get(4)?,
        prep_time: row.get(5)?,
        servings: row.get(6)?,
        calories: row.get(7)?,
        diet_type: row.get(8)?,
        created_at: parse_datetime(row.get::<_, String>(9)?),
        updated_at: parse_datetime(row.get::<_, String>(10)?),
    })
}

fn parse_uuid(s: String) -> Uuid {
    Uuid::parse_str(&s).unwrap_or_else(|_| Uuid::nil())
}

fn parse_datetime(s: String) -> chrono::DateTime<Utc> {
    chrono::DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}
