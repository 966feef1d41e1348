//! Location drill-down handlers: states, cities, zipcodes

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use crate::{db, AppState};

/// Query parameters for the city stage
#[derive(Debug, Deserialize)]
pub struct CityQuery {
    /// Selected state code
    pub state: String,
}

/// Query parameters for the zipcode stage
#[derive(Debug, Deserialize)]
pub struct ZipcodeQuery {
    /// Selected city
    pub city: String,
    /// Selected state code
    pub state: String,
}

/// GET /api/states
///
/// Distinct state codes, ascending. First stage of the drill-down.
pub async fn list_states(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let states = db::get_states(&state.db).await.map_err(ApiError::db)?;
    Ok(Json(states))
}

/// GET /api/cities?state=CA
///
/// Distinct cities for the selected state, ascending.
pub async fn list_cities(
    State(state): State<AppState>,
    Query(query): Query<CityQuery>,
) -> Result<Json<Vec<String>>, ApiError> {
    let cities = db::get_cities(&state.db, &query.state)
        .await
        .map_err(ApiError::db)?;
    Ok(Json(cities))
}

/// GET /api/zipcodes?city=Davis&state=CA
///
/// Distinct postal codes for the selected (city, state) pair, ascending.
pub async fn list_zipcodes(
    State(state): State<AppState>,
    Query(query): Query<ZipcodeQuery>,
) -> Result<Json<Vec<String>>, ApiError> {
    let zipcodes = db::get_zipcodes(&state.db, &query.city, &query.state)
        .await
        .map_err(ApiError::db)?;
    Ok(Json(zipcodes))
}
