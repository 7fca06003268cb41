//! Main entry point for the ip2region-rs CLI tool
//!
//! Resolves IPv4 addresses from arguments, stdin, or as an HTTP query server.

use anyhow::Context;
use clap::Parser;
use log::{info, warn};

use ip2region_rs::cli::Cli;
use ip2region_rs::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG still wins when set
    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    info!("Starting ip2region-rs v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        warn!("Failed to load config: {}, using defaults", e);
        AppConfig::default()
    });

    // Execute CLI logic
    cli.run(config).await.context("ip2region-rs failed")?;

    Ok(())
}
