//! Integration tests for the metrics aggregation batch
//!
//! Require a PostgreSQL database; set BIZLENS_TEST_DATABASE_URL to run.

use bizlens_ma::aggregate;
use serial_test::serial;
use sqlx::PgPool;

async fn setup_test_db() -> Option<PgPool> {
    let url = match std::env::var("BIZLENS_TEST_DATABASE_URL") {
        Ok(url) if !url.is_empty() => url,
        _ => {
            eprintln!("Skipping test: BIZLENS_TEST_DATABASE_URL not set");
            return None;
        }
    };

    let pool = bizlens_common::db::connect(&url)
        .await
        .expect("Should connect to test database");

    bizlens_common::db::ensure_schema(&pool)
        .await
        .expect("Should create schema");

    for table in ["businesses", "reviews", "checkins"] {
        sqlx::query(&format!("TRUNCATE {}", table))
            .execute(&pool)
            .await
            .expect("Should truncate fixture table");
    }

    // One reviewed business, one never reviewed
    sqlx::query(
        "INSERT INTO businesses
         (business_id, name, city, state, postal_code, categories,
          stars, review_count, num_checkins, is_open, hours)
         VALUES
         ('b-cafe', 'Cafe', 'Davis', 'CA', '95616', 'Coffee', 4.0, 2, 1, TRUE, NULL),
         ('b-quiet', 'Quiet Shop', 'Davis', 'CA', '95616', 'Books', 0.0, 0, 0, TRUE, NULL)",
    )
    .execute(&pool)
    .await
    .expect("Should insert fixture businesses");

    sqlx::query(
        "INSERT INTO reviews (review_id, business_id, user_id, stars, date)
         VALUES ('r1', 'b-cafe', 'u1', 5, '2024-01-10'::date),
                ('r2', 'b-cafe', 'u2', 3, '2024-02-20'::date)",
    )
    .execute(&pool)
    .await
    .expect("Should insert fixture reviews");

    sqlx::query("INSERT INTO checkins (business_id, user_id) VALUES ('b-cafe', 'u1')")
        .execute(&pool)
        .await
        .expect("Should insert fixture checkin");

    Some(pool)
}

async fn fetch_scores(pool: &PgPool) -> Vec<(String, Option<f64>, Option<f64>)> {
    sqlx::query_as(
        "SELECT business_id, popularity_score, success_score
         FROM businesses ORDER BY business_id",
    )
    .fetch_all(pool)
    .await
    .expect("Should read scores")
}

#[tokio::test]
#[serial]
async fn test_batch_scores_every_business() {
    let Some(pool) = setup_test_db().await else { return };

    aggregate::run(&pool).await.expect("Aggregation should succeed");

    let scores = fetch_scores(&pool).await;
    assert_eq!(scores.len(), 2);

    // b-cafe: 2 distinct reviewers, 1 distinct checkin user, avg 4.0 stars
    let (_, popularity, success) = &scores[0];
    assert_eq!(popularity.unwrap(), 1.5);
    assert!((success.unwrap() - 0.56).abs() < 1e-9);

    // b-quiet: never reviewed, never checked in; null average must not
    // break scoring
    let (_, popularity, success) = &scores[1];
    assert_eq!(popularity.unwrap(), 0.0);
    assert_eq!(success.unwrap(), 0.0);
}

#[tokio::test]
#[serial]
async fn test_rerun_is_idempotent() {
    let Some(pool) = setup_test_db().await else { return };

    aggregate::run(&pool).await.expect("First run should succeed");
    let first = fetch_scores(&pool).await;

    aggregate::run(&pool).await.expect("Second run should succeed");
    let second = fetch_scores(&pool).await;

    assert_eq!(first, second);
}
