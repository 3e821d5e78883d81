use std::sync::Arc;

use clap::Parser;

use newsdesk::config::{AppConfig, Cli};
use newsdesk::{build_router, middleware, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before anything else so NEWSDESK_LOG_LEVEL is available.
    let _ = dotenvy::dotenv();

    let log_level = std::env::var("NEWSDESK_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    middleware::init_tracing(
        env!("CARGO_PKG_NAME"),
        &log_level,
        middleware::LogFormat::from_env(),
    );

    let cli = Cli::parse();
    let config = AppConfig::load(&cli)?;

    let metrics_handle = if config.metrics_enabled {
        Some(middleware::init_metrics()?)
    } else {
        None
    };

    let addr = config.bind_addr();
    let state = Arc::new(AppState::new(config, metrics_handle)?);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "newsdesk listening");
    axum::serve(listener, app).await?;

    Ok(())
}
