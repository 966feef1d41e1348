//! Popular and successful business rankings for a (zipcode, category) pair
//!
//! Both rankings order by `(review_count DESC, num_checkins DESC)` and limit
//! to ten rows; the computed score annotates each row but does not drive the
//! ordering. That ordering choice is deliberate and consistent across both
//! queries.

use anyhow::Result;
use bizlens_common::scoring::{popularity_score, success_score};
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::PgPool;

/// Ranked business annotated with its popularity score
#[derive(Debug, Clone, Serialize)]
pub struct PopularBusiness {
    pub name: String,
    pub stars: f64,
    pub review_count: i64,
    pub num_checkins: i64,
    pub popularity_score: f64,
}

/// Ranked business annotated with its success score
#[derive(Debug, Clone, Serialize)]
pub struct SuccessfulBusiness {
    pub name: String,
    pub review_count: i64,
    pub num_checkins: i64,
    pub last_review_date: Option<NaiveDate>,
    pub success_score: f64,
}

#[derive(sqlx::FromRow)]
struct PopularRow {
    name: String,
    stars: f64,
    review_count: i64,
    num_checkins: i64,
}

#[derive(sqlx::FromRow)]
struct SuccessfulRow {
    name: String,
    review_count: i64,
    num_checkins: i64,
    last_review_date: Option<NaiveDate>,
    avg_rating: Option<f64>,
}

/// Top 10 businesses by review and check-in volume, with popularity scores
pub async fn get_popular_businesses(
    pool: &PgPool,
    zipcode: &str,
    category: &str,
) -> Result<Vec<PopularBusiness>> {
    let rows = sqlx::query_as::<_, PopularRow>(
        "SELECT name, stars, review_count, num_checkins
         FROM businesses
         WHERE postal_code = $1 AND categories LIKE $2
         ORDER BY review_count DESC, num_checkins DESC
         LIMIT 10",
    )
    .bind(zipcode)
    .bind(format!("%{}%", category))
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| PopularBusiness {
            popularity_score: popularity_score(row.num_checkins as f64, row.review_count as f64),
            name: row.name,
            stars: row.stars,
            review_count: row.review_count,
            num_checkins: row.num_checkins,
        })
        .collect())
}

/// Top 10 businesses by review and check-in volume, with success scores
///
/// Joins reviews for each business's latest review date and average rating.
/// Businesses with no reviews at all do not appear (inner join).
pub async fn get_successful_businesses(
    pool: &PgPool,
    zipcode: &str,
    category: &str,
) -> Result<Vec<SuccessfulBusiness>> {
    let rows = sqlx::query_as::<_, SuccessfulRow>(
        "SELECT b.name, b.review_count, b.num_checkins,
                MAX(r.date) AS last_review_date,
                AVG(r.stars)::float8 AS avg_rating
         FROM businesses b
         JOIN reviews r ON r.business_id = b.business_id
         WHERE b.postal_code = $1 AND b.categories LIKE $2
         GROUP BY b.business_id, b.name, b.review_count, b.num_checkins
         ORDER BY b.review_count DESC, b.num_checkins DESC
         LIMIT 10",
    )
    .bind(zipcode)
    .bind(format!("%{}%", category))
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| SuccessfulBusiness {
            success_score: success_score(
                row.last_review_date,
                row.avg_rating.unwrap_or(0.0),
                row.num_checkins as f64,
            ),
            name: row.name,
            review_count: row.review_count,
            num_checkins: row.num_checkins,
            last_review_date: row.last_review_date,
        })
        .collect())
}
