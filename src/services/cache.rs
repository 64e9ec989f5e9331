use crate::sources::bybit::normalize_symbol;
use crate::types::{Candle, Timeframe};
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CandleKey {
    symbol: String,
    timeframe: Timeframe,
    limit: usize,
}

struct CacheEntry {
    candles: Arc<Vec<Candle>>,
    expires_at: Instant,
}

/// Short-lived cache of fetched candle sequences.
///
/// A zero TTL disables caching entirely.
pub struct CandleCache {
    data: DashMap<CandleKey, CacheEntry>,
    ttl: Duration,
}

impl CandleCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            data: DashMap::new(),
            ttl,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    /// Symbols are keyed by exchange pair, so `BTC/USDT` and `BTCUSDT` share an entry.
    fn key(symbol: &str, timeframe: Timeframe, limit: usize) -> CandleKey {
        CandleKey {
            symbol: normalize_symbol(symbol),
            timeframe,
            limit,
        }
    }

    /// Cached candles, if present and not expired.
    pub fn get(&self, symbol: &str, timeframe: Timeframe, limit: usize) -> Option<Arc<Vec<Candle>>> {
        if !self.is_enabled() {
            return None;
        }
        let key = Self::key(symbol, timeframe, limit);
        let entry = self.data.get(&key)?;
        if entry.expires_at > Instant::now() {
            Some(entry.candles.clone())
        } else {
            drop(entry);
            self.data.remove(&key);
            None
        }
    }

    pub fn insert(&self, symbol: &str, timeframe: Timeframe, limit: usize, candles: Arc<Vec<Candle>>) {
        if !self.is_enabled() {
            return;
        }
        self.data.insert(
            Self::key(symbol, timeframe, limit),
            CacheEntry {
                candles,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Remove all expired entries.
    pub fn cleanup(&self) {
        let now = Instant::now();
        self.data.retain(|_, entry| entry.expires_at > now);
    }

    /// Number of entries, including expired ones not yet cleaned up.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
