/// Agent push-token sweeper
///
/// Sends a test notification to every push token stored on agent documents
/// and removes the tokens FCM reports as unregistered or invalid.
///
/// Usage:
/// ```bash
/// GOOGLE_APPLICATION_CREDENTIALS=./service-account.json cargo run --bin token-sweeper
/// ```
///
/// See `Config` for the remaining environment variables (`DRY_RUN`,
/// `AGENTS_COLLECTION`, `TOKEN_FIELD`, ...).
use anyhow::{Context, Result};
use token_sweeper::{logging, Config, TokenSweeper};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = Config::from_env();
    logging::init_tracing(config.as_ref().map(Config::json_logs).unwrap_or(false));

    let result = match config {
        Ok(config) => run(config).await,
        Err(e) => Err(e).context("Invalid configuration"),
    };

    if let Err(e) = result {
        error!("❌ Token sweep failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<()> {
    info!(
        "Starting token sweep of '{}' (field '{}', dry_run={})",
        config.agents_collection, config.token_field, config.dry_run
    );

    let sweeper = TokenSweeper::from_config(&config).context("Failed to initialize clients")?;
    let report = sweeper.run().await?;

    info!("=== Sweep Summary ===");
    info!("Token entries found: {}", report.found);
    info!("Sent: {}", report.sent());
    info!("Pruned: {}", report.pruned());
    info!("Skipped: {}", report.skipped());
    info!("Prune failures: {}", report.prune_failed());

    Ok(())
}
