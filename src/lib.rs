//! Augur - technical-indicator engine and LLM trading-signal service

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod sources;
pub mod types;

use axum::Router;
use config::Config;
use services::AnalysisService;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub analysis: Arc<AnalysisService>,
}

impl AppState {
    pub fn new(config: Arc<Config>) -> Self {
        let analysis = Arc::new(AnalysisService::new(config.clone()));
        Self { config, analysis }
    }

    pub fn with_analysis(config: Arc<Config>, analysis: AnalysisService) -> Self {
        Self {
            config,
            analysis: Arc::new(analysis),
        }
    }
}

/// Build the HTTP application with CORS and request tracing.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
