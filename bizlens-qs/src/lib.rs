//! bizlens-qs library - Query Service module
//!
//! Exposes the drill-down lookup pipeline (state → city → zipcode →
//! category → business) and its auxiliary statistics and ranking queries
//! over HTTP. All database access is read-only; the UI collaborator is
//! responsible for validating that all four selections are present before
//! invoking the terminal search.

use axum::Router;
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,
}

impl AppState {
    /// Create new application state
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/api/states", get(api::list_states))
        .route("/api/cities", get(api::list_cities))
        .route("/api/zipcodes", get(api::list_zipcodes))
        .route("/api/categories", get(api::list_categories))
        .route("/api/businesses", get(api::list_businesses))
        .route("/api/zipcodes/:zipcode/stats", get(api::zipcode_stats))
        .route(
            "/api/zipcodes/:zipcode/top-categories",
            get(api::top_categories),
        )
        .route("/api/rankings/popular", get(api::popular_businesses))
        .route("/api/rankings/successful", get(api::successful_businesses))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
