//! Indicator and analysis endpoints.

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::types::{AnalysisReport, AnalysisRequest, MarketDataSummary, Timeframe};
use crate::AppState;

/// API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    fn new(data: T) -> Self {
        Self { data }
    }
}

/// Query parameters for the indicators endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct IndicatorsQuery {
    /// Comma-separated timeframe labels, e.g. `1h,4h`.
    pub timeframes: Option<String>,
    /// Use synthetic candles instead of the exchange.
    pub demo: Option<bool>,
}

impl IndicatorsQuery {
    fn timeframes(&self) -> Result<Option<Vec<Timeframe>>> {
        match self.timeframes.as_deref() {
            None => Ok(None),
            Some(raw) => Timeframe::parse_list(raw)
                .map(Some)
                .map_err(|bad| AppError::BadRequest(format!("Unknown timeframe '{}'", bad))),
        }
    }
}

pub fn indicators_router() -> Router<AppState> {
    Router::new().route("/:symbol", get(get_indicators))
}

pub fn analyze_router() -> Router<AppState> {
    Router::new().route("/", post(analyze))
}

/// Indicator summaries for a symbol, one per timeframe.
async fn get_indicators(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<IndicatorsQuery>,
) -> Result<Json<ApiResponse<Vec<MarketDataSummary>>>> {
    let timeframes = query.timeframes()?;
    let summaries = state
        .analysis
        .indicators(&symbol, timeframes, query.demo)
        .await?;

    Ok(Json(ApiResponse::new(summaries)))
}

/// Run a full analysis and return the signal report.
async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<ApiResponse<AnalysisReport>>> {
    let report = state.analysis.run(request).await?;
    Ok(Json(ApiResponse::new(report)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_timeframes() {
        let query = IndicatorsQuery {
            timeframes: Some("4h, 1h".to_string()),
            demo: Some(true),
        };
        assert_eq!(
            query.timeframes().unwrap(),
            Some(vec![Timeframe::FourHours, Timeframe::OneHour])
        );
        assert_eq!(IndicatorsQuery::default().timeframes().unwrap(), None);
    }

    #[test]
    fn test_query_rejects_unknown_timeframe() {
        let query = IndicatorsQuery {
            timeframes: Some("1h,2w".to_string()),
            demo: None,
        };
        assert!(matches!(query.timeframes(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_api_response_serialization() {
        let json = serde_json::to_value(ApiResponse::new(vec![1, 2])).unwrap();
        assert_eq!(json, serde_json::json!({"data": [1, 2]}));
    }
}
