use anyhow::Context;
use clap::Parser;
use realty_gateway::Gateway;
use realty_gateway::config::{load_config, load_default_config};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Real-estate aggregation gateway
#[derive(Parser, Debug)]
#[command(name = "realty-gateway", version, about)]
struct Cli {
    /// Load configuration from a JSON file instead of the built-in default
    #[arg(short, long, env = "REALTY_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen host
    #[arg(long, env = "HOST")]
    host: Option<String>,

    /// Override the listen port
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "realty_gateway=info,realty_providers=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path).with_context(|| format!("loading {}", path.display()))?
        }
        None => {
            tracing::info!("Using default configuration");
            load_default_config()?
        }
    };

    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    tracing::info!(
        enabled = config.enabled_providers().len(),
        "Providers: {}",
        config
            .enabled_providers()
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    tracing::info!(
        "WebSocket: ws://{}:{}/ws",
        config.server.host,
        config.server.port
    );
    tracing::info!(
        "Health: http://{}:{}/health",
        config.server.host,
        config.server.port
    );

    let gateway = Gateway::from_config(&config)?;
    gateway.run().await?;

    Ok(())
}
