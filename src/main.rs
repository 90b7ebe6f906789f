use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use map_bridge::{AmapClient, BridgeConfig, BridgeService, logging, web};

/// HTTP bridge to the AMap weather and geocoding APIs with offline fallback data
#[derive(Debug, Parser)]
#[command(name = "map-bridge", version, about)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listen port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = BridgeConfig::load_from_path(cli.config)?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    logging::init(&config.logging)?;

    let client = AmapClient::new(&config.provider)?;
    let service = Arc::new(BridgeService::new(Arc::new(client)));
    let app = web::app(service, &config.server);

    tracing::info!("Available endpoints:");
    tracing::info!("  POST /api/mcp/weather - weather forecast");
    tracing::info!("  POST /api/mcp/geo - geocoding");
    tracing::info!("  GET /health - health check");

    web::run(&config.server, app).await
}
