//! Technical indicator implementations.
//!
//! Everything here is pure and deterministic. Short inputs produce documented
//! neutral values instead of errors; only an empty or non-finite candle
//! sequence is rejected, at [`IndicatorEngine::analyze`].

pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;

pub use atr::Atr;
pub use bollinger::BollingerBands;
pub use ema::{Ema, EmaSeed};
pub use macd::Macd;
pub use rsi::{Rsi, NEUTRAL_RSI};

use crate::types::{closes, Candle, EmaSet, TechnicalIndicators};
use thiserror::Error;

/// EMA periods reported in every snapshot.
pub const EMA_PERIODS: [usize; 4] = [9, 20, 50, 200];

/// Indicator engine errors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum IndicatorError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Computes a [`TechnicalIndicators`] snapshot from a candle sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndicatorEngine {
    ema_seed: EmaSeed,
}

impl IndicatorEngine {
    pub fn new(ema_seed: EmaSeed) -> Self {
        Self { ema_seed }
    }

    /// Indicators for the most recent bar of `candles` (oldest first).
    pub fn analyze(&self, candles: &[Candle]) -> Result<TechnicalIndicators, IndicatorError> {
        if candles.is_empty() {
            return Err(IndicatorError::InvalidInput(
                "candle sequence is empty".to_string(),
            ));
        }
        if let Some((i, _)) = candles.iter().enumerate().find(|(_, c)| {
            ![c.open, c.high, c.low, c.close].iter().all(|v| v.is_finite())
        }) {
            return Err(IndicatorError::InvalidInput(format!(
                "candle {} has a non-finite price",
                i
            )));
        }

        let closes = closes(candles);
        let last_ema = |period: usize| {
            Ema::new(period)
                .with_seed(self.ema_seed)
                .last(&closes)
                .unwrap_or(closes[closes.len() - 1])
        };

        Ok(TechnicalIndicators {
            rsi: Rsi::default().calculate(&closes),
            macd: Macd::default().with_seed(self.ema_seed).calculate(&closes),
            ema: EmaSet {
                ema9: last_ema(EMA_PERIODS[0]),
                ema20: last_ema(EMA_PERIODS[1]),
                ema50: last_ema(EMA_PERIODS[2]),
                ema200: last_ema(EMA_PERIODS[3]),
            },
            bollinger: BollingerBands::default().calculate(&closes),
            atr: Atr::default().calculate(candles),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BollingerValues, MacdValues};

    fn flat_candles(count: usize, price: f64) -> Vec<Candle> {
        (0..count)
            .map(|i| Candle {
                time: i as i64 * 3_600_000,
                open: price,
                high: price,
                low: price,
                close: price,
                volume: 1.0,
            })
            .collect()
    }

    #[test]
    fn test_analyze_empty_is_invalid_input() {
        let err = IndicatorEngine::default().analyze(&[]).unwrap_err();
        assert!(matches!(err, IndicatorError::InvalidInput(_)));
    }

    #[test]
    fn test_analyze_rejects_nan() {
        let mut candles = flat_candles(5, 10.0);
        candles[3].close = f64::NAN;
        let err = IndicatorEngine::default().analyze(&candles).unwrap_err();
        assert_eq!(
            err,
            IndicatorError::InvalidInput("candle 3 has a non-finite price".to_string())
        );
    }

    #[test]
    fn test_analyze_single_candle() {
        let ind = IndicatorEngine::default()
            .analyze(&flat_candles(1, 42.0))
            .unwrap();
        assert_eq!(ind.rsi, NEUTRAL_RSI);
        assert_eq!(ind.macd, MacdValues::default());
        assert_eq!(ind.ema.ema9, 42.0);
        assert_eq!(ind.ema.ema200, 42.0);
        assert_eq!(ind.bollinger, BollingerValues::default());
        assert_eq!(ind.atr, 0.0);
    }

    #[test]
    fn test_analyze_flat_market() {
        let ind = IndicatorEngine::default()
            .analyze(&flat_candles(250, 100.0))
            .unwrap();
        assert_eq!(ind.rsi, 100.0);
        assert!(ind.macd.histogram.abs() < 1e-9);
        assert_eq!(ind.bollinger.width, 0.0);
        assert_eq!(ind.atr, 0.0);
        assert!((ind.ema.ema200 - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_seed_choice_changes_early_emas() {
        let candles: Vec<Candle> = (0..60)
            .map(|i| {
                let p = 100.0 + i as f64;
                Candle {
                    time: i as i64,
                    open: p,
                    high: p + 1.0,
                    low: p - 1.0,
                    close: p,
                    volume: 1.0,
                }
            })
            .collect();
        let first = IndicatorEngine::new(EmaSeed::FirstValue)
            .analyze(&candles)
            .unwrap();
        let sma = IndicatorEngine::new(EmaSeed::SmaWarmup)
            .analyze(&candles)
            .unwrap();
        assert_ne!(first.ema.ema50, sma.ema.ema50);
        // Non-EMA indicators do not depend on the seed.
        assert_eq!(first.rsi, sma.rsi);
        assert_eq!(first.atr, sma.atr);
        assert_eq!(first.bollinger, sma.bollinger);
    }
}
