//! Idempotent schema bootstrap
//!
//! Each `CREATE TABLE IF NOT EXISTS` is safe to re-run. The census ingest
//! binary ensures the `zipcodes` table before upserting; the business tables
//! are normally populated by the bulk dataset import and are created here so
//! a fresh database can accept fixture data (integration tests rely on this).

use crate::Result;
use sqlx::PgPool;

/// Create the census reference table if it does not exist
pub async fn ensure_zipcodes_table(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS zipcodes (
            zip_code   VARCHAR(5) PRIMARY KEY,
            population BIGINT NOT NULL DEFAULT 0,
            avg_income DOUBLE PRECISION NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the business, review, and check-in tables if they do not exist
pub async fn ensure_business_tables(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS businesses (
            business_id      TEXT PRIMARY KEY,
            name             TEXT NOT NULL,
            city             TEXT NOT NULL,
            state            TEXT NOT NULL,
            postal_code      TEXT NOT NULL,
            categories       TEXT NOT NULL DEFAULT '',
            stars            DOUBLE PRECISION NOT NULL DEFAULT 0,
            review_count     BIGINT NOT NULL DEFAULT 0,
            num_checkins     BIGINT NOT NULL DEFAULT 0,
            is_open          BOOLEAN NOT NULL DEFAULT TRUE,
            hours            TEXT,
            popularity_score DOUBLE PRECISION,
            success_score    DOUBLE PRECISION
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS reviews (
            review_id   TEXT PRIMARY KEY,
            business_id TEXT NOT NULL,
            user_id     TEXT NOT NULL,
            stars       BIGINT NOT NULL,
            date        DATE NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS checkins (
            business_id TEXT NOT NULL,
            user_id     TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create every BizLens table if needed
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    ensure_business_tables(pool).await?;
    ensure_zipcodes_table(pool).await?;
    Ok(())
}
