//! Database connection and schema bootstrap

pub mod init;

pub use init::*;

use crate::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Connect to the PostgreSQL database
///
/// The pool is the single long-lived database resource per process;
/// the entry point creates it once and passes it to every component.
pub async fn connect(database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    info!("Connected to database");
    Ok(pool)
}
