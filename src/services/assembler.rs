//! Per-timeframe candle fetch and indicator computation.

use crate::error::{AppError, Result};
use crate::services::indicators::IndicatorEngine;
use crate::sources::CandleProvider;
use crate::types::{MarketData, Timeframe};
use futures_util::future::try_join_all;
use tracing::info;

/// Builds [`MarketData`] for each requested timeframe.
#[derive(Clone)]
pub struct MarketDataAssembler {
    provider: CandleProvider,
    engine: IndicatorEngine,
    candle_limit: usize,
}

impl MarketDataAssembler {
    pub fn new(provider: CandleProvider, engine: IndicatorEngine, candle_limit: usize) -> Self {
        Self {
            provider,
            engine,
            candle_limit,
        }
    }

    pub fn engine(&self) -> IndicatorEngine {
        self.engine
    }

    /// Fetch and analyze one timeframe.
    pub async fn assemble_one(&self, symbol: &str, timeframe: Timeframe) -> Result<MarketData> {
        let candles = self
            .provider
            .fetch(symbol, timeframe, self.candle_limit)
            .await?;

        let last = candles
            .last()
            .ok_or_else(|| AppError::NotFound(format!("No candles for {} on {}", symbol, timeframe)))?;
        let current_price = last.close;
        let indicators = self.engine.analyze(&candles)?;

        info!(
            symbol = %symbol,
            timeframe = %timeframe,
            candles = candles.len(),
            price = current_price,
            rsi = indicators.rsi,
            "Computed indicators"
        );

        Ok(MarketData {
            symbol: symbol.to_string(),
            timeframe,
            current_price,
            candles: candles.to_vec(),
            indicators,
        })
    }

    /// Market data for every timeframe, in the order given.
    ///
    /// Timeframes are fetched concurrently; the first failure aborts the run.
    pub async fn assemble(&self, symbol: &str, timeframes: &[Timeframe]) -> Result<Vec<MarketData>> {
        if timeframes.is_empty() {
            return Err(AppError::BadRequest(
                "At least one timeframe is required".to_string(),
            ));
        }

        try_join_all(timeframes.iter().map(|tf| self.assemble_one(symbol, *tf))).await
    }
}
