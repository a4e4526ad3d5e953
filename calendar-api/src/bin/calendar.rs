//! Calendar service binary - loads configuration and serves the HTTP API.

use shared::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let config = Config::load()?;
    info!(address = %config.listen_addr(), "configuration loaded");

    calendar_api::run(config).await?;
    Ok(())
}
