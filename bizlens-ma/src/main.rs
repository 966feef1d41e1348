//! bizlens-ma (Metrics Aggregator) - One-shot batch score recomputation
//!
//! Computes per-business review and check-in aggregates in one grouped
//! query, then overwrites every business's popularity and success scores.
//! Safe to re-run at any time; scores always reflect the aggregate state at
//! write time.

use anyhow::Result;
use bizlens_common::config::resolve_database_url;
use clap::Parser;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "bizlens-ma", about = "BizLens business score aggregation")]
struct Args {
    /// Database connection URL (overrides env and config file)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting BizLens Metrics Aggregator (bizlens-ma) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let database_url = resolve_database_url(args.database_url.as_deref());

    let pool = match bizlens_common::db::connect(&database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    bizlens_ma::aggregate::run(&pool).await?;

    info!("Score aggregation complete");
    Ok(())
}
