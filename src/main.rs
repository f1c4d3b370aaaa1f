#![cfg(not(tarpaulin_include))]

use roster_bridge::app;
use roster_bridge::config::Config;

/// Main entry point for the roster web service
///
/// Loads `.env` when present, initialises logging from `RUST_LOG`
/// (default `info`), reads the configuration and serves until killed.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env is normal in hosted deployments
    let _ = dotenvy::dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;
    log::info!(
        "Serving sheet {} (audit tab {})",
        config.sheet_id,
        config.history_sheet
    );

    app::run(config).await
}
