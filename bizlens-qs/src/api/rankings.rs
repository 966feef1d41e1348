//! Popular and successful business ranking handlers

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use crate::db::{self, PopularBusiness, SuccessfulBusiness};
use crate::AppState;

/// Query parameters for both ranking endpoints
#[derive(Debug, Deserialize)]
pub struct RankingQuery {
    /// Selected postal code
    pub zipcode: String,
    /// Selected category token
    pub category: String,
}

/// GET /api/rankings/popular?zipcode=95616&category=Coffee
///
/// Top 10 businesses by `(review_count DESC, num_checkins DESC)`, each
/// annotated with its popularity score. The score does not drive the
/// ordering.
pub async fn popular_businesses(
    State(state): State<AppState>,
    Query(query): Query<RankingQuery>,
) -> Result<Json<Vec<PopularBusiness>>, ApiError> {
    let ranked = db::get_popular_businesses(&state.db, &query.zipcode, &query.category)
        .await
        .map_err(ApiError::db)?;
    Ok(Json(ranked))
}

/// GET /api/rankings/successful?zipcode=95616&category=Coffee
///
/// Top 10 businesses by the same `(review_count DESC, num_checkins DESC)`
/// ordering, each annotated with its success score.
pub async fn successful_businesses(
    State(state): State<AppState>,
    Query(query): Query<RankingQuery>,
) -> Result<Json<Vec<SuccessfulBusiness>>, ApiError> {
    let ranked = db::get_successful_businesses(&state.db, &query.zipcode, &query.category)
        .await
        .map_err(ApiError::db)?;
    Ok(Json(ranked))
}
