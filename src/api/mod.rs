pub mod analysis;
pub mod health;

use crate::AppState;
use axum::Router;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/api/indicators", analysis::indicators_router())
        .nest("/api/analyze", analysis::analyze_router())
}
