use anyhow::Context;
use tokio::net::TcpListener;
use ums_api::{ApiConfig, router::app, tracing::init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables
    dotenvy::dotenv().ok();
    let config = ApiConfig::from_env()?;

    init_tracing(&config.env)?;

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!(addr = %config.bind_addr, "Server listening");

    serve(listener, &config).await
}

async fn serve(listener: TcpListener, config: &ApiConfig) -> anyhow::Result<()> {
    axum::serve(listener, app(config)).await?;
    Ok(())
}
