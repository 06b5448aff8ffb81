use dotenv::dotenv;
use hyperliquid_mcp::{config::Config, hyperliquid::HyperliquidClient, server};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting Hyperliquid MCP Server...");

    let config = Config::from_env();
    let client = HyperliquidClient::new(config.testnet)?;
    if client.is_testnet() {
        info!("Using testnet API");
    }

    server::run(client).await?;

    Ok(())
}
