//! ladle-ui library - Recipe manager HTTP service
//!
//! Exposes the recipe, label, profile, and session APIs over an axum router.
//! All mutating handlers resolve the caller's identity explicitly (via the
//! `identity` extractor) and thread it into the service logic - there is no
//! ambient authentication state.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod identity;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Build application router
///
/// Reads are public; mutations check the caller's identity inside the
/// handler so each can report Unauthenticated / NotFound / Forbidden in the
/// required order.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/health", get(api::health_check))
        .route(
            "/api/recipes",
            get(api::list_recipes).post(api::create_recipe),
        )
        .route(
            "/api/recipes/:id",
            get(api::get_recipe)
                .put(api::update_recipe)
                .delete(api::delete_recipe),
        )
        .route("/api/labels", get(api::list_labels).post(api::create_label))
        .route(
            "/api/labels/:id",
            get(api::get_label)
                .put(api::update_label)
                .delete(api::delete_label),
        )
        .route("/api/labels/:id/recipes", get(api::recipes_by_label))
        .route("/api/auth/register", post(api::register))
        .route("/api/auth/login", post(api::login))
        .route("/api/auth/logout", post(api::logout))
        .route(
            "/api/profile",
            get(api::get_profile).put(api::update_profile),
        )
        .route("/api/profile/recipes", get(api::my_recipes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
