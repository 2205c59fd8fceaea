use anyhow::{Context, Result};
use weather_proxy::{VERSION, WeatherProxyConfig, logging, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config = WeatherProxyConfig::load().context("Failed to load configuration")?;
    logging::init(&config.logging)?;

    tracing::info!(version = VERSION, "Starting weather proxy");
    web::run(&config).await.context("Web server failed")?;
    Ok(())
}
