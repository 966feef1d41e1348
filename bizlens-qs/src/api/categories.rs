//! Category drill-down handler

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use crate::{db, AppState};

/// Query parameters for the category stage
#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    /// Selected postal code
    pub zipcode: String,
}

/// GET /api/categories?zipcode=95616
///
/// Distinct category tokens across every business in the postal code,
/// ascending, duplicates removed.
pub async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<CategoryQuery>,
) -> Result<Json<Vec<String>>, ApiError> {
    let categories = db::get_categories(&state.db, &query.zipcode)
        .await
        .map_err(ApiError::db)?;
    Ok(Json(categories))
}
