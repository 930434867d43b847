use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;

use pricecheck_price_job::{build_state, create_app, ResultSink};
use pricecheck_utils::{init_logging, AppConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration ({}), using defaults", e);
        AppConfig::default()
    });

    init_logging(&config.logging)?;
    info!("Starting Pricecheck price job service");

    let state = build_state(&config, ResultSink::Postgres).await?;
    let app = create_app(state);

    let listener = TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    info!("Price job service listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
