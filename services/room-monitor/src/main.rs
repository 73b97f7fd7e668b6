//! Room Monitor CLI
//!
//! Command-line interface for the live zone status dashboard.

use std::path::PathBuf;

use clap::Parser;
use room_monitor::{load_config, Config, RoomMonitorBuilder};
use tracing::Level;

#[derive(Parser)]
#[command(name = "room-monitor")]
#[command(about = "Live zone status dashboard fed by a WebSocket update stream")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// WebSocket feed URL (overrides config file)
    #[arg(long)]
    feed_url: Option<String>,

    /// Dashboard port (overrides config file)
    #[arg(long)]
    dashboard_port: Option<u16>,

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
        "Parsed command line arguments: config={:?}, feed_url={:?}, dashboard_port={:?}, log_level={:?}",
        args.config,
        args.feed_url,
        args.dashboard_port,
        args.log_level
    );

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    if let Some(feed_url) = args.feed_url {
        config.feed.url = feed_url;
    }
    if let Some(dashboard_port) = args.dashboard_port {
        config.dashboard.port = dashboard_port;
    }

    tracing::info!("Starting room monitor");
    tracing::debug!(
        "Feed: {} (enabled={}), default zones: {}",
        config.feed.url,
        config.feed.enabled,
        config.zones.defaults.len()
    );

    RoomMonitorBuilder::new(config).build().await?.start().await?;

    Ok(())
}
