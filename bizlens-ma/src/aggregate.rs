//! Per-business metric aggregation and score persistence
//!
//! One grouped query produces `(review_count, num_checkins, avg_rating,
//! last_review_date)` for every business; both scores are computed from
//! those aggregates and written back in a single transaction. A re-run is
//! idempotent: it always overwrites both score fields from a fresh
//! aggregate, never updates them incrementally.

use anyhow::Result;
use bizlens_common::scoring::{popularity_score, success_score};
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::info;

/// Aggregate inputs for one business's scores
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BusinessMetrics {
    pub business_id: String,
    pub review_count: i64,
    pub num_checkins: i64,
    /// Null for a business with no reviews; treated as 0 when scoring
    pub avg_rating: Option<f64>,
    pub last_review_date: Option<NaiveDate>,
}

/// Fetch aggregate metrics for every business
///
/// Left joins keep businesses with zero reviews or check-ins in the result,
/// with counts of 0 and a null average rating.
pub async fn fetch_business_metrics(pool: &PgPool) -> Result<Vec<BusinessMetrics>> {
    let metrics = sqlx::query_as::<_, BusinessMetrics>(
        "SELECT b.business_id,
                COUNT(DISTINCT r.user_id) AS review_count,
                COUNT(DISTINCT c.user_id) AS num_checkins,
                AVG(r.stars)::float8      AS avg_rating,
                MAX(r.date)               AS last_review_date
         FROM businesses b
         LEFT JOIN reviews  r ON r.business_id = b.business_id
         LEFT JOIN checkins c ON c.business_id = b.business_id
         GROUP BY b.business_id",
    )
    .fetch_all(pool)
    .await?;
    Ok(metrics)
}

/// Compute `(popularity_score, success_score)` for one business
pub fn compute_scores(metrics: &BusinessMetrics) -> (f64, f64) {
    let popularity = popularity_score(
        metrics.num_checkins as f64,
        metrics.review_count as f64,
    );
    let success = success_score(
        metrics.last_review_date,
        metrics.avg_rating.unwrap_or(0.0),
        metrics.num_checkins as f64,
    );
    (popularity, success)
}

/// Persist both scores for every business, committing once at the end
pub async fn update_scores(pool: &PgPool, metrics: &[BusinessMetrics]) -> Result<u64> {
    let mut tx = pool.begin().await?;
    let mut updated = 0u64;

    for business in metrics {
        let (popularity, success) = compute_scores(business);
        let result = sqlx::query(
            "UPDATE businesses
             SET popularity_score = $1, success_score = $2
             WHERE business_id = $3",
        )
        .bind(popularity)
        .bind(success)
        .bind(&business.business_id)
        .execute(&mut *tx)
        .await?;
        updated += result.rows_affected();
    }

    tx.commit().await?;
    Ok(updated)
}

/// Run the full aggregation batch
pub async fn run(pool: &PgPool) -> Result<()> {
    let metrics = fetch_business_metrics(pool).await?;
    info!(businesses = metrics.len(), "Fetched business metrics");

    let updated = update_scores(pool, &metrics).await?;
    info!(updated = updated, "Updated business scores");

    Ok(())
}
