//! Zipcode statistics and top-categories handlers

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use super::ApiError;
use crate::db::{self, CategoryCount};
use crate::AppState;

/// Zipcode statistics response
///
/// `population` and `avg_income` are null when the postal code has no
/// census reference row; the UI renders that as "No data". Income is
/// formatted to one decimal place.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub business_count: i64,
    pub population: Option<i64>,
    pub avg_income: Option<String>,
}

/// GET /api/zipcodes/:zipcode/stats
pub async fn zipcode_stats(
    State(state): State<AppState>,
    Path(zipcode): Path<String>,
) -> Result<Json<StatsResponse>, ApiError> {
    let stats = db::get_zipcode_stats(&state.db, &zipcode)
        .await
        .map_err(ApiError::db)?;

    Ok(Json(StatsResponse {
        business_count: stats.business_count,
        population: stats.population,
        avg_income: stats.avg_income.map(|income| format!("{:.1}", income)),
    }))
}

/// GET /api/zipcodes/:zipcode/top-categories
///
/// Category occurrence counts across all businesses in the postal code,
/// sorted by count descending.
pub async fn top_categories(
    State(state): State<AppState>,
    Path(zipcode): Path<String>,
) -> Result<Json<Vec<CategoryCount>>, ApiError> {
    let top = db::get_top_categories(&state.db, &zipcode)
        .await
        .map_err(ApiError::db)?;
    Ok(Json(top))
}
