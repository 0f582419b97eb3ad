//! Homework bot CLI
//!
//! Command-line interface for the homework review status poller.

use std::path::PathBuf;

use clap::Parser;
use homework_bot::{load_config, Config};
use tracing::Level;

#[derive(Parser)]
#[command(name = "homework-bot")]
#[command(about = "Homework review status poller with Telegram notifications")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seconds between polls (overrides config file)
    #[arg(long)]
    interval: Option<u64>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    tracing::debug!(
        "Parsed command line arguments: config={:?}, interval={:?}, log_level={:?}",
        args.config,
        args.interval,
        args.log_level
    );

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    config.apply_env();

    if let Some(interval) = args.interval {
        config.retry_interval_seconds = interval;
    }

    let credentials = match config.credentials() {
        Ok(credentials) => credentials,
        Err(e) => {
            tracing::error!("Program stopped: {}", e);
            return Err(e.into());
        }
    };

    tracing::info!("Starting homework bot");
    homework_bot::run(config, credentials).await?;

    Ok(())
}
