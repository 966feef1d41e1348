//! bizlens-qs (Query Service) - Business lookup over HTTP
//!
//! Serves the state → city → zipcode → category → business drill-down
//! pipeline plus zipcode statistics and popularity/success rankings to the
//! BizLens UI.

use anyhow::Result;
use bizlens_common::config::resolve_database_url;
use bizlens_qs::{build_router, AppState};
use clap::Parser;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "bizlens-qs", about = "BizLens business lookup service")]
struct Args {
    /// Database connection URL (overrides env and config file)
    #[arg(long)]
    database_url: Option<String>,

    /// Port to listen on
    #[arg(long, default_value_t = 5810)]
    port: u16,
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
        "Starting BizLens Query Service (bizlens-qs) v{} [{}] built {} ({})",
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

    // Create application state and router
    let state = AppState::new(pool);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", args.port)).await?;
    info!("bizlens-qs listening on http://127.0.0.1:{}", args.port);
    info!("Health check: http://127.0.0.1:{}/health", args.port);

    axum::serve(listener, app).await?;

    Ok(())
}
