//! Relative Strength Index (RSI).

/// Neutral value reported when there is not enough history.
pub const NEUTRAL_RSI: f64 = 50.0;

/// RSI over a fixed trailing window.
///
/// Gains and losses are simple averages over the last `period` deltas, not
/// Wilder-smoothed. Values range from 0-100:
/// - Below 30: Oversold
/// - Above 70: Overbought
pub struct Rsi {
    period: usize,
}

impl Default for Rsi {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// Minimum number of closes for a non-neutral result.
    pub fn min_periods(&self) -> usize {
        self.period + 1
    }

    /// RSI of the most recent `period` deltas.
    ///
    /// Returns [`NEUTRAL_RSI`] with fewer than `period + 1` closes and `100`
    /// when the window has no losses.
    pub fn calculate(&self, closes: &[f64]) -> f64 {
        if self.period == 0 || closes.len() < self.min_periods() {
            return NEUTRAL_RSI;
        }

        let mut gains = 0.0;
        let mut losses = 0.0;
        for pair in closes[closes.len() - self.min_periods()..].windows(2) {
            let change = pair[1] - pair[0];
            if change > 0.0 {
                gains += change;
            } else {
                losses -= change;
            }
        }

        let avg_gain = gains / self.period as f64;
        let avg_loss = losses / self.period as f64;

        if avg_loss == 0.0 {
            return 100.0;
        }

        let rs = avg_gain / avg_loss;
        100.0 - (100.0 / (1.0 + rs))
    }
}
