//! Average True Range (ATR).

use crate::types::Candle;

/// ATR indicator.
///
/// TR = max(High-Low, |High-PrevClose|, |Low-PrevClose|), averaged with a
/// simple mean over the most recent `period` bars.
pub struct Atr {
    period: usize,
}

impl Default for Atr {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Atr {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// Calculate True Range.
    fn true_range(current: &Candle, previous: &Candle) -> f64 {
        let hl = current.high - current.low;
        let hc = (current.high - previous.close).abs();
        let lc = (current.low - previous.close).abs();
        hl.max(hc).max(lc)
    }

    pub fn min_periods(&self) -> usize {
        self.period + 1
    }

    /// ATR of the last `period` bars, or `0` with fewer than `period + 1` candles.
    pub fn calculate(&self, candles: &[Candle]) -> f64 {
        if self.period == 0 || candles.len() < self.min_periods() {
            return 0.0;
        }

        let recent = &candles[candles.len() - self.min_periods()..];
        let sum: f64 = recent
            .windows(2)
            .map(|pair| Self::true_range(&pair[1], &pair[0]))
            .sum();

        sum / self.period as f64
    }
}
