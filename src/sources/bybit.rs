//! Bybit v5 market data client (linear perpetuals).

use crate::error::{body_preview, AppError, Result};
use crate::types::{Candle, Timeframe};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Largest `limit` accepted by the kline endpoint.
pub const MAX_KLINE_LIMIT: usize = 1000;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BybitResponse<T> {
    ret_code: i64,
    ret_msg: String,
    result: Option<T>,
}

#[derive(Debug, Deserialize)]
struct KlineResult {
    #[serde(default)]
    list: Vec<Vec<String>>,
}

/// Map user input such as `btc/usdt` or `BTC/USDT:USDT` to the Bybit pair `BTCUSDT`.
pub fn normalize_symbol(symbol: &str) -> String {
    let upper = symbol.trim().to_uppercase();
    let pair = upper.split(':').next().unwrap_or_default();
    pair.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

/// Parse one kline row: `[startTime, open, high, low, close, volume, turnover]`.
fn parse_kline_row(row: &[String]) -> Option<Candle> {
    if row.len() < 6 {
        return None;
    }
    Some(Candle {
        time: row[0].parse().ok()?,
        open: row[1].parse().ok()?,
        high: row[2].parse().ok()?,
        low: row[3].parse().ok()?,
        close: row[4].parse().ok()?,
        volume: row[5].parse().ok()?,
    })
}

/// Bybit REST client.
#[derive(Clone)]
pub struct BybitClient {
    client: Client,
    base_url: String,
}

impl BybitClient {
    /// Create a new Bybit client.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .user_agent("Augur/0.1")
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Fetch up to `limit` candles for `symbol`, oldest first.
    pub async fn fetch_candles(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Candle>> {
        let pair = normalize_symbol(symbol);
        if pair.is_empty() {
            return Err(AppError::BadRequest(format!("Invalid symbol '{}'", symbol)));
        }
        let limit = limit.clamp(1, MAX_KLINE_LIMIT);
        let url = format!("{}/v5/market/kline", self.base_url);

        debug!("Fetching Bybit klines: {} {} limit={}", pair, timeframe, limit);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("category", "linear"),
                ("symbol", pair.as_str()),
                ("interval", timeframe.bybit_interval()),
                ("limit", limit.to_string().as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Bybit ({}): {}", timeframe, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(
                "Bybit API returned {}: {}",
                status,
                body_preview(&text)
            );
            return Err(AppError::ExternalApi(format!(
                "Bybit ({}): HTTP {}",
                timeframe, status
            )));
        }

        let body: BybitResponse<KlineResult> = response
            .json()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Bybit ({}): {}", timeframe, e)))?;
        if body.ret_code != 0 {
            return Err(AppError::ExternalApi(format!(
                "Bybit ({}): {} (retCode {})",
                timeframe, body.ret_msg, body.ret_code
            )));
        }

        let rows = body.result.map(|r| r.list).unwrap_or_default();
        let mut candles = Vec::with_capacity(rows.len());
        for row in &rows {
            let candle = parse_kline_row(row).ok_or_else(|| {
                AppError::ExternalApi(format!("Bybit ({}): malformed kline row {:?}", timeframe, row))
            })?;
            candles.push(candle);
        }

        if candles.is_empty() {
            return Err(AppError::NotFound(format!(
                "No candles for {} on {}",
                pair, timeframe
            )));
        }

        // Bybit lists newest first.
        candles.sort_by_key(|c| c.time);
        debug!("Bybit returned {} candles for {} {}", candles.len(), pair, timeframe);

        Ok(candles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_symbol() {
        assert_eq!(normalize_symbol("BTC/USDT"), "BTCUSDT");
        assert_eq!(normalize_symbol("btc/usdt"), "BTCUSDT");
        assert_eq!(normalize_symbol("BTC/USDT:USDT"), "BTCUSDT");
        assert_eq!(normalize_symbol(" ETHUSDT "), "ETHUSDT");
        assert_eq!(normalize_symbol("sol-usdt"), "SOLUSDT");
        assert_eq!(normalize_symbol("/"), "");
    }

    #[test]
    fn test_parse_kline_row() {
        let row: Vec<String> = [
            "1670608800000",
            "17071",
            "17073",
            "17027",
            "17055.5",
            "268611",
            "15.74462667",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        let candle = parse_kline_row(&row).unwrap();
        assert_eq!(candle.time, 1_670_608_800_000);
        assert_eq!(candle.open, 17071.0);
        assert_eq!(candle.high, 17073.0);
        assert_eq!(candle.low, 17027.0);
        assert_eq!(candle.close, 17055.5);
        assert_eq!(candle.volume, 268611.0);
    }

    #[test]
    fn test_parse_kline_row_rejects_short_or_bad_rows() {
        let short: Vec<String> = vec!["1".into(), "2".into()];
        assert!(parse_kline_row(&short).is_none());
        let bad: Vec<String> = ["x", "1", "1", "1", "1", "1"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert!(parse_kline_row(&bad).is_none());
    }

    #[test]
    fn test_response_deserialization() {
        let json = r#"{
            "retCode": 0,
            "retMsg": "OK",
            "result": {
                "symbol": "BTCUSDT",
                "category": "linear",
                "list": [["1670608800000","1","2","0.5","1.5","10","15"]]
            },
            "retExtInfo": {},
            "time": 1672025956592
        }"#;
        let body: BybitResponse<KlineResult> = serde_json::from_str(json).unwrap();
        assert_eq!(body.ret_code, 0);
        assert_eq!(body.result.unwrap().list.len(), 1);
    }

    #[test]
    fn test_error_response_deserialization() {
        let json = r#"{"retCode":10001,"retMsg":"params error","result":{},"retExtInfo":{}}"#;
        let body: BybitResponse<KlineResult> = serde_json::from_str(json).unwrap();
        assert_eq!(body.ret_code, 10001);
        assert!(body.result.unwrap().list.is_empty());
    }
}
