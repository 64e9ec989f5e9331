use augur::config::Config;
use augur::AppState;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "augur=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Arc::new(Config::from_env());
    info!("Starting Augur server on {}:{}", config.host, config.port);

    if config.gemini.api_key.is_none() {
        warn!("GEMINI_API_KEY is not set; /api/analyze will fail until it is configured");
    }
    if config.market_data.demo_mode {
        info!("Demo mode enabled, candles are generated locally");
    }

    let state = AppState::new(config.clone());

    // Evict expired candle cache entries
    {
        let cache = state.analysis.candle_cache();
        if cache.is_enabled() {
            tokio::spawn(async move {
                loop {
                    tokio::time::sleep(tokio::time::Duration::from_secs(60)).await;
                    cache.cleanup();
                }
            });
        }
    }

    let app = augur::app(state);

    // Start the server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Augur server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
