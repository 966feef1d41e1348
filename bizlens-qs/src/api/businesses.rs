//! Filtered business listing handler (terminal drill-down stage)

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use crate::db::{self, BusinessRow};
use crate::AppState;

/// Query parameters for the terminal search
#[derive(Debug, Deserialize)]
pub struct BusinessQuery {
    /// Selected postal code
    pub zipcode: String,
    /// Selected category token
    pub category: String,
}

/// GET /api/businesses?zipcode=95616&category=Coffee
///
/// Full business rows for the postal code whose category string contains
/// the selected category, ordered by name ascending. Containment is a
/// substring test, so a category that is a substring of a longer category
/// also matches.
pub async fn list_businesses(
    State(state): State<AppState>,
    Query(query): Query<BusinessQuery>,
) -> Result<Json<Vec<BusinessRow>>, ApiError> {
    let businesses = db::get_businesses_by_category(&state.db, &query.zipcode, &query.category)
        .await
        .map_err(ApiError::db)?;
    Ok(Json(businesses))
}
