mod handlers;
pub mod middleware;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::db::Database;

pub use middleware::SecurityConfig;

/// Router with authentication and rate limiting disabled and permissive CORS.
pub fn create_router(db: Database) -> Router {
    create_router_with_config(db, SecurityConfig::disabled())
}

pub fn create_router_with_config(db: Database, config: SecurityConfig) -> Router {
    let mut api = Router::new()
        // Meals
        .route("/meals", get(handlers::list_meals).post(handlers::create_meal))
        .route("/meals/", get(handlers::list_meals).post(handlers::create_meal))
        .route("/meals/random", get(handlers::random_meals))
        .route(
            "/meals/{id}",
            get(handlers::get_meal)
                .put(handlers::update_meal)
                .delete(handlers::delete_meal),
        )
        // Planning
        .route("/shopping-list", post(handlers::shopping_list))
        .route("/weekly-plan", get(handlers::weekly_plan))
        // Health
        .route("/health", get(handlers::health))
        .layer(from_fn_with_state(config.clone(), middleware::auth_middleware));

    if let Some(limiter) = config.rate_limiter.clone() {
        api = api.layer(from_fn_with_state(limiter, middleware::rate_limit_middleware));
    }

    // Served under /api/v1 and at the root, where the existing front-ends call it.
    Router::new()
        .route("/", get(handlers::root))
        .merge(api.clone())
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(config.cors_layer())
        .with_state(db)
}
