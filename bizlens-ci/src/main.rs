//! bizlens-ci (Census Ingest) - One-shot batch census data import
//!
//! Fetches population and average-income figures per postal code from the
//! US Census ACS API, joins them by zip code, and upserts the combined rows
//! into the zipcode reference table. No retries; a failed fetch degrades to
//! an empty dataset for that source, while a failed database connection
//! aborts the whole job before any fetch occurs.

use anyhow::Result;
use bizlens_ci::census::{self, CensusClient, INCOME_URL, POPULATION_URL};
use bizlens_common::config::resolve_database_url;
use clap::Parser;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "bizlens-ci", about = "BizLens census data ingest")]
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
        "Starting BizLens Census Ingest (bizlens-ci) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let database_url = resolve_database_url(args.database_url.as_deref());

    // Connect before fetching anything; a connection failure aborts the job
    let pool = match bizlens_common::db::connect(&database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    bizlens_common::db::ensure_zipcodes_table(&pool).await?;

    let client = CensusClient::new()?;

    let population_rows = client.fetch_dataset(POPULATION_URL).await;
    let income_rows = client.fetch_dataset(INCOME_URL).await;

    let population = census::parse_population(&population_rows);
    let income = census::parse_income(&income_rows);
    info!(
        population_zips = population.len(),
        income_zips = income.len(),
        "Parsed census datasets"
    );

    let combined = census::combine(&population, &income);
    census::upsert_zipcodes(&pool, &combined).await?;

    info!("Census ingest complete");
    Ok(())
}
