//! MACD (Moving Average Convergence Divergence).

use super::ema::{Ema, EmaSeed};
use crate::types::MacdValues;

/// MACD with the standard 12/26/9 periods.
///
/// - MACD Line = EMA(12) - EMA(26), with the first 26 elements dropped
/// - Signal Line = EMA(9) of the MACD Line
/// - Histogram = MACD Line - Signal Line
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
    seed: EmaSeed,
}

impl Default for Macd {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
            seed: EmaSeed::default(),
        }
    }
}

impl Macd {
    pub fn with_seed(mut self, seed: EmaSeed) -> Self {
        self.seed = seed;
        self
    }

    /// MACD line after discarding the slow-period warm-up region.
    pub fn line(&self, closes: &[f64]) -> Vec<f64> {
        let fast = Ema::new(self.fast_period).with_seed(self.seed).series(closes);
        let slow = Ema::new(self.slow_period).with_seed(self.seed).series(closes);

        fast.iter()
            .zip(slow.iter())
            .map(|(f, s)| f - s)
            .skip(self.slow_period)
            .collect()
    }

    /// Latest MACD value, signal and histogram.
    ///
    /// Value and signal fall back to `0` when the truncated line is empty,
    /// i.e. with `slow_period` closes or fewer.
    pub fn calculate(&self, closes: &[f64]) -> MacdValues {
        let macd_line = self.line(closes);
        let signal_line = Ema::new(self.signal_period)
            .with_seed(self.seed)
            .series(&macd_line);

        let value = macd_line.last().copied().unwrap_or(0.0);
        let signal = signal_line.last().copied().unwrap_or(0.0);

        MacdValues {
            value,
            signal,
            histogram: value - signal,
        }
    }
}
