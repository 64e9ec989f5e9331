//! Exponential Moving Average (EMA).

use serde::{Deserialize, Serialize};

/// How the first EMA value is seeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmaSeed {
    /// `ema[0] = data[0]`, recurrence from the second element on.
    ///
    /// Early values carry a warm-up bias. This is the default because
    /// downstream consumers were built against these exact numbers.
    #[default]
    FirstValue,
    /// Running mean until `period` points are available, then the SMA of the
    /// first `period` values seeds the recurrence.
    SmaWarmup,
}

impl EmaSeed {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "first-value" | "first_value" | "first" => Some(Self::FirstValue),
            "sma-warmup" | "sma_warmup" | "sma" => Some(Self::SmaWarmup),
            _ => None,
        }
    }
}

/// EMA over a numeric series.
///
/// Smoothing factor `k = 2 / (period + 1)`,
/// `ema[i] = data[i] * k + ema[i-1] * (1 - k)`.
#[derive(Debug, Clone, Copy)]
pub struct Ema {
    period: usize,
    seed: EmaSeed,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            seed: EmaSeed::default(),
        }
    }

    pub fn with_seed(mut self, seed: EmaSeed) -> Self {
        self.seed = seed;
        self
    }

    /// Full EMA series, same length as `data`. Empty input yields an empty series.
    pub fn series(&self, data: &[f64]) -> Vec<f64> {
        let Some(&first) = data.first() else {
            return Vec::new();
        };

        let k = 2.0 / (self.period as f64 + 1.0);
        let mut out = Vec::with_capacity(data.len());
        out.push(first);

        match self.seed {
            EmaSeed::FirstValue => {
                for &value in &data[1..] {
                    let prev = out[out.len() - 1];
                    out.push(value * k + prev * (1.0 - k));
                }
            }
            EmaSeed::SmaWarmup => {
                let warmup = self.period.max(1);
                let mut sum = first;
                for (i, &value) in data.iter().enumerate().skip(1) {
                    if i < warmup {
                        sum += value;
                        out.push(sum / (i + 1) as f64);
                    } else {
                        let prev = out[i - 1];
                        out.push(value * k + prev * (1.0 - k));
                    }
                }
            }
        }

        out
    }

    /// Last value of the series, if any.
    pub fn last(&self, data: &[f64]) -> Option<f64> {
        self.series(data).last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    #[test]
    fn test_ema_first_value_seed() {
        let data = [10.0, 11.0, 12.0, 13.0, 14.0];
        let series = Ema::new(3).series(&data);
        // k = 0.5
        assert_eq!(series.len(), 5);
        assert_close(series[0], 10.0);
        assert_close(series[1], 10.5);
        assert_close(series[2], 11.25);
        assert_close(series[3], 12.125);
        assert_close(series[4], 13.0625);
    }

    #[test]
    fn test_ema_sma_warmup_seed() {
        let data = [10.0, 11.0, 12.0, 13.0, 14.0];
        let series = Ema::new(3).with_seed(EmaSeed::SmaWarmup).series(&data);
        assert_eq!(series.len(), 5);
        assert_close(series[0], 10.0);
        assert_close(series[1], 10.5);
        // SMA of first three
        assert_close(series[2], 11.0);
        assert_close(series[3], 12.0);
        assert_close(series[4], 13.0);
    }

    #[test]
    fn test_ema_first_element_is_input() {
        for period in [1, 2, 9, 200] {
            for seed in [EmaSeed::FirstValue, EmaSeed::SmaWarmup] {
                let series = Ema::new(period).with_seed(seed).series(&[42.5, 40.0, 41.0]);
                assert_eq!(series[0], 42.5);
            }
        }
    }

    #[test]
    fn test_ema_empty_input() {
        assert!(Ema::new(9).series(&[]).is_empty());
        assert_eq!(Ema::new(9).last(&[]), None);
    }

    #[test]
    fn test_ema_constant_series() {
        let data = vec![250.0; 60];
        for v in Ema::new(20).series(&data) {
            assert_close(v, 250.0);
        }
    }

    #[test]
    fn test_ema_seed_from_str() {
        assert_eq!(EmaSeed::from_str("first-value"), Some(EmaSeed::FirstValue));
        assert_eq!(EmaSeed::from_str("SMA-Warmup"), Some(EmaSeed::SmaWarmup));
        assert_eq!(EmaSeed::from_str("wilder"), None);
    }
}
