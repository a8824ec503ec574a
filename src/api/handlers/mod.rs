use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rand::{rngs::StdRng, SeedableRng};
use uuid::Uuid;

use crate::db::Database;
use crate::models::*;
use crate::planning;

// ============================================================
// Error Handling
// ============================================================

/// Log an internal error and return a sanitized response to the client.
/// The full error is logged server-side, clients only see a generic message.
fn internal_error(e: impl std::fmt::Display) -> (StatusCode, String) {
    tracing::error!("Internal error: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_string(),
    )
}

fn meal_not_found() -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, "Meal not found".to_string())
}

// ============================================================
// Health
// ============================================================

pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({ "message": "MealGenie API v2 is running" }))
}

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Meals
// ============================================================

pub async fn list_meals(
    State(db): State<Database>,
    Query(filter): Query<MealFilter>,
) -> Result<Json<Vec<Meal>>, (StatusCode, String)> {
    db.list_meals(&filter).map(Json).map_err(internal_error)
}

pub async fn get_meal(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Json<Meal>, (StatusCode, String)> {
    db.get_meal(id)
        .map_err(internal_error)?
        .map(Json)
        .ok_or_else(meal_not_found)
}

pub async fn create_meal(
    State(db): State<Database>,
    Json(input): Json<CreateMealInput>,
) -> Result<(StatusCode, Json<Meal>), (StatusCode, String)> {
    db.create_meal(input)
        .map(|m| (StatusCode::CREATED, Json(m)))
        .map_err(internal_error)
}

pub async fn update_meal(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateMealInput>,
) -> Result<Json<Meal>, (StatusCode, String)> {
    db.update_meal(id, input)
        .map_err(internal_error)?
        .map(Json)
        .ok_or_else(meal_not_found)
}

pub async fn delete_meal(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    if db.delete_meal(id).map_err(internal_error)? {
        Ok(Json(
            serde_json::json!({ "message": "Meal deleted successfully" }),
        ))
    } else {
        Err(meal_not_found())
    }
}

// ============================================================
// Planning
// ============================================================

pub async fn random_meals(
    State(db): State<Database>,
    Query(filter): Query<PlanFilter>,
) -> Result<Json<DayMealPlan>, (StatusCode, String)> {
    let mut rng = StdRng::from_entropy();
    planning::random_meals(&db, &filter, &mut rng)
        .map(Json)
        .map_err(internal_error)
}

pub async fn weekly_plan(
    State(db): State<Database>,
    Query(filter): Query<PlanFilter>,
) -> Result<Json<WeeklyPlan>, (StatusCode, String)> {
    let mut rng = StdRng::from_entropy();
    planning::generate_weekly_plan(&db, &filter, &mut rng)
        .map(Json)
        .map_err(internal_error)
}

pub async fn shopping_list(
    State(db): State<Database>,
    Json(request): Json<ShoppingListRequest>,
) -> Result<Json<ShoppingList>, (StatusCode, String)> {
    planning::shopping_list(&db, &request.meal_ids)
        .map(Json)
        .map_err(internal_error)
}
