//! Opening Range Breakout engine - entry point.
//!
//! Wires the engine to its alert sinks and runs until interrupted. Market
//! data is pushed in by the host process through [`orbs_engine::Engine::on_tick`];
//! this binary owns configuration, telemetry, and lifecycle.

use anyhow::Result;
use clap::Parser;
use orbs_alert::{AlertSink, LogSink};
use std::sync::Arc;
use tracing::info;

/// Opening Range Breakout detection and risk-management engine
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via ORBS_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    orbs_telemetry::init_logging()?;

    info!("Starting ORB engine v{}", env!("CARGO_PKG_VERSION"));

    let config = match args.config {
        Some(path) => {
            info!(config_path = %path, "Loading configuration");
            orbs_engine::AppConfig::from_file(&path)?
        }
        None => orbs_engine::AppConfig::load()?,
    };
    config.validate()?;

    let sinks: Vec<Arc<dyn AlertSink>> = vec![Arc::new(LogSink)];
    let engine = orbs_engine::Engine::new(config, sinks)?;

    tokio::signal::ctrl_c().await?;
    info!("Interrupt received");

    engine.shutdown().await;
    Ok(())
}
