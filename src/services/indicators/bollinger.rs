//! Bollinger Bands.

use crate::types::BollingerValues;

/// Bollinger Bands indicator.
///
/// Consists of:
/// - Middle band: mean of the last `period` closes
/// - Upper band: mean + multiplier * population std dev
/// - Lower band: mean - multiplier * population std dev
pub struct BollingerBands {
    period: usize,
    std_dev_multiplier: f64,
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self {
            period: 20,
            std_dev_multiplier: 2.0,
        }
    }
}

impl BollingerBands {
    pub fn new(period: usize, std_dev_multiplier: f64) -> Self {
        Self {
            period,
            std_dev_multiplier,
        }
    }

    /// Population standard deviation.
    fn std_dev(values: &[f64], mean: f64) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        let variance: f64 =
            values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
        variance.sqrt()
    }

    /// Bands for the most recent `period` closes.
    ///
    /// All fields are `0` with fewer than `period` closes. `width` is also `0`
    /// when the mean is zero.
    pub fn calculate(&self, closes: &[f64]) -> BollingerValues {
        if self.period == 0 || closes.len() < self.period {
            return BollingerValues::default();
        }

        let window = &closes[closes.len() - self.period..];
        let middle = window.iter().sum::<f64>() / self.period as f64;
        let std_dev = Self::std_dev(window, middle);

        let upper = middle + self.std_dev_multiplier * std_dev;
        let lower = middle - self.std_dev_multiplier * std_dev;
        let width = if middle == 0.0 {
            0.0
        } else {
            (upper - lower) / middle
        };

        BollingerValues {
            upper,
            middle,
            lower,
            width,
        }
    }
}
