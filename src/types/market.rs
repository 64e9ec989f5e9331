use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Candle, TechnicalIndicators, Timeframe};

/// Candles and derived indicators for one symbol on one timeframe.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketData {
    pub symbol: String,
    pub timeframe: Timeframe,
    /// Close of the most recent candle.
    pub current_price: f64,
    pub candles: Vec<Candle>,
    pub indicators: TechnicalIndicators,
}

impl MarketData {
    /// Compact per-timeframe view sent to the signal model.
    pub fn snapshot(&self) -> TimeframeSnapshot {
        TimeframeSnapshot {
            price: self.current_price,
            indicators: self.indicators,
        }
    }

    /// Summary row used in API responses and reports.
    pub fn summary(&self) -> MarketDataSummary {
        MarketDataSummary {
            tf: self.timeframe,
            price: self.current_price,
            indicators: self.indicators,
        }
    }
}

/// Value of one timeframe entry in the prompt payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeframeSnapshot {
    pub price: f64,
    pub indicators: TechnicalIndicators,
}

/// Indicator inputs for one timeframe, without the raw candles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketDataSummary {
    pub tf: Timeframe,
    pub price: f64,
    pub indicators: TechnicalIndicators,
}

/// Build the `timeframe label -> {price, indicators}` object embedded in the prompt.
///
/// Keys keep the order of `market_data`.
pub fn prompt_payload(market_data: &[MarketData]) -> Result<Map<String, Value>, serde_json::Error> {
    let mut payload = Map::new();
    for md in market_data {
        payload.insert(
            md.timeframe.label().to_string(),
            serde_json::to_value(md.snapshot())?,
        );
    }
    Ok(payload)
}
