//! Run a single price job from the command line and print its results.

use anyhow::Result;
use clap::Parser;

use pricecheck_models::JobResponse;
use pricecheck_price_job::{build_state, ResultSink};
use pricecheck_utils::{init_logging, AppConfig, StorageBackend};

#[derive(Parser, Debug)]
#[command(name = "price-job", version, about = "Look up prices for an uploaded parts list")]
struct Cli {
    /// User the price results are recorded for
    user_id: String,
    /// Object path of the upload in the storage bucket
    file_path: String,
    /// Original file name; its suffix selects the parser
    file_name: String,
    /// Read the upload from this directory instead of the configured bucket
    #[arg(long)]
    local_root: Option<String>,
    /// Do not write price results to the database
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load()?;
    if let Some(root) = cli.local_root {
        config.storage.backend = StorageBackend::Local;
        config.storage.local_root = root;
    }
    init_logging(&config.logging)?;

    let sink = if cli.dry_run {
        ResultSink::DryRun
    } else {
        ResultSink::Postgres
    };
    let state = build_state(&config, sink).await?;

    let results = state
        .price_job
        .run(&cli.user_id, &cli.file_path, &cli.file_name)
        .await?;

    println!("{}", serde_json::to_string_pretty(&JobResponse { results })?);
    Ok(())
}
