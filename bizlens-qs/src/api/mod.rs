//! HTTP API handlers for bizlens-qs

pub mod businesses;
pub mod categories;
pub mod health;
pub mod locations;
pub mod rankings;
pub mod stats;

pub use businesses::list_businesses;
pub use categories::list_categories;
pub use health::health_routes;
pub use locations::{list_cities, list_states, list_zipcodes};
pub use rankings::{popular_businesses, successful_businesses};
pub use stats::{top_categories, zipcode_stats};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Handler errors
#[derive(Debug)]
pub enum ApiError {
    DatabaseError(String),
}

impl ApiError {
    pub fn db(err: anyhow::Error) -> Self {
        ApiError::DatabaseError(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::DatabaseError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", msg),
            ),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
