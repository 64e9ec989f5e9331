//! Synthetic candle generation for demo mode and tests.

use crate::types::{Candle, Timeframe};
use rand::Rng;

/// Per-step volatility as a fraction of the current price.
const VOLATILITY_PCT: f64 = 0.02;

/// Random-walk candle generator.
///
/// Each step moves the close by `uniform(-0.5, 0.5) * price * 2%` and extends
/// the wicks by up to half the step volatility on each side.
pub struct MockCandleGenerator<R> {
    rng: R,
    interval_ms: i64,
}

impl MockCandleGenerator<rand::rngs::ThreadRng> {
    /// Hourly generator backed by the thread-local RNG.
    pub fn hourly() -> Self {
        Self::new(rand::thread_rng(), Timeframe::OneHour)
    }
}

impl<R: Rng> MockCandleGenerator<R> {
    pub fn new(rng: R, timeframe: Timeframe) -> Self {
        Self {
            rng,
            interval_ms: timeframe.duration_ms(),
        }
    }

    /// Generate `count` candles whose spacing ends one interval before now.
    pub fn generate(&mut self, count: usize, start_price: f64) -> Vec<Candle> {
        let now = chrono::Utc::now().timestamp_millis();
        self.generate_until(count, start_price, now)
    }

    /// Generate `count` candles; the first opens at `end_ms - count * interval`.
    pub fn generate_until(&mut self, count: usize, start_price: f64, end_ms: i64) -> Vec<Candle> {
        let mut candles = Vec::with_capacity(count);
        let mut price = start_price;
        let mut time = end_ms - count as i64 * self.interval_ms;

        for _ in 0..count {
            let volatility = price * VOLATILITY_PCT;
            let change = (self.rng.gen::<f64>() - 0.5) * volatility;
            let open = price;
            let close = price + change;
            let high = open.max(close) + self.rng.gen::<f64>() * volatility * 0.5;
            let low = open.min(close) - self.rng.gen::<f64>() * volatility * 0.5;
            let volume = self.rng.gen::<f64>() * 1000.0;

            candles.push(Candle {
                time,
                open,
                high,
                low,
                close,
                volume,
            });

            price = close;
            time += self.interval_ms;
        }

        candles
    }
}

/// Generate hourly mock candles with the thread-local RNG.
pub fn generate_mock_candles(count: usize, start_price: f64) -> Vec<Candle> {
    MockCandleGenerator::hourly().generate(count, start_price)
}
