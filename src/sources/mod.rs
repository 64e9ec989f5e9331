//! Candle sources: the Bybit exchange or the synthetic generator.

pub mod bybit;

pub use bybit::BybitClient;

use crate::error::Result;
use crate::services::cache::CandleCache;
use crate::services::mock::MockCandleGenerator;
use crate::types::{Candle, Timeframe};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tracing::debug;

/// Synthetic candle source used in demo mode.
#[derive(Debug, Clone)]
pub struct MockSource {
    start_price: f64,
    /// Fixed seed for reproducible runs; `None` uses the thread RNG.
    seed: Option<u64>,
}

impl MockSource {
    pub fn new(start_price: f64) -> Self {
        Self {
            start_price,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn candles(&self, timeframe: Timeframe, count: usize) -> Vec<Candle> {
        match self.seed {
            Some(seed) => {
                let rng = StdRng::seed_from_u64(seed.wrapping_add(timeframe.duration_ms() as u64));
                MockCandleGenerator::new(rng, timeframe).generate(count, self.start_price)
            }
            None => MockCandleGenerator::new(rand::thread_rng(), timeframe)
                .generate(count, self.start_price),
        }
    }
}

/// Where candles for an analysis run come from.
#[derive(Clone)]
pub enum CandleProvider {
    Exchange {
        client: BybitClient,
        cache: Arc<CandleCache>,
    },
    Mock(MockSource),
}

impl CandleProvider {
    pub fn is_mock(&self) -> bool {
        matches!(self, CandleProvider::Mock(_))
    }

    /// Candles for one symbol and timeframe, oldest first.
    pub async fn fetch(&self, symbol: &str, timeframe: Timeframe, limit: usize) -> Result<Arc<Vec<Candle>>> {
        match self {
            CandleProvider::Exchange { client, cache } => {
                if let Some(cached) = cache.get(symbol, timeframe, limit) {
                    debug!("Candle cache hit: {} {}", symbol, timeframe);
                    return Ok(cached);
                }
                let candles = Arc::new(client.fetch_candles(symbol, timeframe, limit).await?);
                cache.insert(symbol, timeframe, limit, candles.clone());
                Ok(candles)
            }
            CandleProvider::Mock(source) => Ok(Arc::new(source.candles(timeframe, limit))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_provider_returns_requested_count() {
        let provider = CandleProvider::Mock(MockSource::new(100.0).with_seed(5));
        let candles = provider.fetch("BTC/USDT", Timeframe::FourHours, 60).await.unwrap();
        assert_eq!(candles.len(), 60);
        assert_eq!(candles[0].open, 100.0);
        assert_eq!(candles[1].time - candles[0].time, Timeframe::FourHours.duration_ms());
        assert!(provider.is_mock());
    }

    #[test]
    fn test_seeded_mock_differs_per_timeframe() {
        let source = MockSource::new(100.0).with_seed(9);
        let a = source.candles(Timeframe::OneHour, 10);
        let b = source.candles(Timeframe::FourHours, 10);
        let closes_a: Vec<f64> = a.iter().map(|c| c.close).collect();
        let closes_b: Vec<f64> = b.iter().map(|c| c.close).collect();
        assert_ne!(closes_a, closes_b);
    }

    #[test]
    fn test_seeded_mock_is_reproducible() {
        let source = MockSource::new(100.0).with_seed(9);
        let a: Vec<f64> = source.candles(Timeframe::OneHour, 10).iter().map(|c| c.close).collect();
        let b: Vec<f64> = source.candles(Timeframe::OneHour, 10).iter().map(|c| c.close).collect();
        assert_eq!(a, b);
    }
}
