use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{MarketDataSummary, SignalResponse, Timeframe};

/// Per-run overrides of the configured analysis defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub capital: Option<f64>,
    /// Risk per trade, in percent of capital.
    #[serde(default)]
    pub risk: Option<f64>,
    #[serde(default)]
    pub timeframes: Option<Vec<Timeframe>>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub demo_mode: Option<bool>,
}

/// Result of one complete analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub id: String,
    pub symbol: String,
    pub model: String,
    pub capital: f64,
    pub risk: f64,
    pub generated_at: DateTime<Utc>,
    pub inputs: Vec<MarketDataSummary>,
    pub signal: SignalResponse,
}
