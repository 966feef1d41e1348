//! Drill-down stage queries: state → city → zipcode → category → business
//!
//! String matches are case-sensitive equality except category filtering,
//! which is substring containment against the stored delimited list.

use anyhow::Result;
use serde::Serialize;
use sqlx::PgPool;
use std::collections::BTreeSet;

use super::categories::split_category_tokens;

/// Full business row returned by the terminal drill-down stage
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct BusinessRow {
    pub name: String,
    pub city: String,
    pub state: String,
    pub stars: f64,
    pub review_count: i64,
    pub num_checkins: i64,
    pub is_open: bool,
    pub hours: Option<String>,
}

/// Distinct state codes, ascending
pub async fn get_states(pool: &PgPool) -> Result<Vec<String>> {
    let states = sqlx::query_scalar("SELECT DISTINCT state FROM businesses ORDER BY state")
        .fetch_all(pool)
        .await?;
    Ok(states)
}

/// Distinct cities for a state, ascending
pub async fn get_cities(pool: &PgPool, state: &str) -> Result<Vec<String>> {
    let cities =
        sqlx::query_scalar("SELECT DISTINCT city FROM businesses WHERE state = $1 ORDER BY city")
            .bind(state)
            .fetch_all(pool)
            .await?;
    Ok(cities)
}

/// Distinct postal codes for a (city, state) pair, ascending
pub async fn get_zipcodes(pool: &PgPool, city: &str, state: &str) -> Result<Vec<String>> {
    let zipcodes = sqlx::query_scalar(
        "SELECT DISTINCT postal_code FROM businesses
         WHERE city = $1 AND state = $2
         ORDER BY postal_code",
    )
    .bind(city)
    .bind(state)
    .fetch_all(pool)
    .await?;
    Ok(zipcodes)
}

/// Distinct category tokens for a postal code, ascending
///
/// Every matching business's category string is split and flattened;
/// duplicates are removed.
pub async fn get_categories(pool: &PgPool, zipcode: &str) -> Result<Vec<String>> {
    let category_strings: Vec<String> =
        sqlx::query_scalar("SELECT categories FROM businesses WHERE postal_code = $1")
            .bind(zipcode)
            .fetch_all(pool)
            .await?;

    let mut tokens = BTreeSet::new();
    for raw in &category_strings {
        for token in split_category_tokens(raw) {
            tokens.insert(token.to_string());
        }
    }

    Ok(tokens.into_iter().collect())
}

/// Businesses in a postal code whose category string contains the selected
/// category, ordered by name ascending
pub async fn get_businesses_by_category(
    pool: &PgPool,
    zipcode: &str,
    category: &str,
) -> Result<Vec<BusinessRow>> {
    let businesses = sqlx::query_as::<_, BusinessRow>(
        "SELECT name, city, state, stars, review_count, num_checkins, is_open, hours
         FROM businesses
         WHERE postal_code = $1 AND categories LIKE $2
         ORDER BY name",
    )
    .bind(zipcode)
    .bind(format!("%{}%", category))
    .fetch_all(pool)
    .await?;
    Ok(businesses)
}
