use std::env;

use crate::services::indicators::EmaSeed;
use crate::types::Timeframe;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_BYBIT_BASE_URL: &str = "https://api.bybit.com";

/// Signal model (Gemini) configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key. Analysis runs fail with a credential error when absent.
    pub api_key: Option<String>,
    /// Default model name.
    pub model: String,
    /// REST base URL.
    pub base_url: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// Language for all free-text fields of the signal.
    pub language: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.0-flash".to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            temperature: 0.5,
            language: "pt-BR".to_string(),
        }
    }
}

/// Market data source configuration.
#[derive(Debug, Clone)]
pub struct MarketDataConfig {
    /// Serve synthetic candles instead of calling the exchange.
    pub demo_mode: bool,
    /// Candles requested per timeframe.
    pub candle_limit: usize,
    /// First price of generated candles in demo mode.
    pub mock_start_price: f64,
    /// Bybit REST base URL.
    pub bybit_base_url: String,
    /// How long fetched candles are reused (0 = no caching).
    pub candle_cache_ttl_secs: u64,
    /// EMA seeding used by the indicator engine.
    pub ema_seed: EmaSeed,
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            demo_mode: false,
            candle_limit: 100,
            mock_start_price: 50_000.0,
            bybit_base_url: DEFAULT_BYBIT_BASE_URL.to_string(),
            candle_cache_ttl_secs: 30,
            ema_seed: EmaSeed::FirstValue,
        }
    }
}

/// Defaults applied to analysis runs that do not override them.
#[derive(Debug, Clone)]
pub struct AnalysisDefaults {
    pub symbol: String,
    pub capital: f64,
    /// Risk per trade, percent of capital.
    pub risk_pct: f64,
    pub timeframes: Vec<Timeframe>,
}

impl Default for AnalysisDefaults {
    fn default() -> Self {
        Self {
            symbol: "BTC/USDT".to_string(),
            capital: 1000.0,
            risk_pct: 2.0,
            timeframes: vec![Timeframe::OneHour, Timeframe::FourHours],
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Timeout for outbound HTTP requests.
    pub http_timeout_secs: u64,
    pub gemini: GeminiConfig,
    pub market_data: MarketDataConfig,
    pub defaults: AnalysisDefaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            http_timeout_secs: 30,
            gemini: GeminiConfig::default(),
            market_data: MarketDataConfig::default(),
            defaults: AnalysisDefaults::default(),
        }
    }
}

fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

fn flag(key: &str) -> Option<bool> {
    env::var(key).ok().map(|v| v == "true" || v == "1")
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let base = Self::default();

        let timeframes = match env::var("DEFAULT_TIMEFRAMES") {
            Ok(raw) => match Timeframe::parse_list(&raw) {
                Ok(list) if !list.is_empty() => list,
                Ok(_) => base.defaults.timeframes.clone(),
                Err(bad) => {
                    tracing::warn!("Ignoring DEFAULT_TIMEFRAMES: unknown timeframe '{}'", bad);
                    base.defaults.timeframes.clone()
                }
            },
            Err(_) => base.defaults.timeframes.clone(),
        };

        let ema_seed = match env::var("EMA_SEED") {
            Ok(raw) => EmaSeed::from_str(&raw).unwrap_or_else(|| {
                tracing::warn!("Ignoring EMA_SEED: unknown seed '{}'", raw);
                base.market_data.ema_seed
            }),
            Err(_) => base.market_data.ema_seed,
        };

        Self {
            host: env::var("HOST").unwrap_or(base.host),
            port: parsed("PORT").unwrap_or(base.port),
            http_timeout_secs: parsed("HTTP_TIMEOUT_SECS").unwrap_or(base.http_timeout_secs),
            gemini: GeminiConfig {
                api_key: env::var("GEMINI_API_KEY").ok().filter(|k| !k.trim().is_empty()),
                model: env::var("GEMINI_MODEL").unwrap_or(base.gemini.model),
                base_url: env::var("GEMINI_BASE_URL").unwrap_or(base.gemini.base_url),
                temperature: parsed("LLM_TEMPERATURE").unwrap_or(base.gemini.temperature),
                language: env::var("SIGNAL_LANGUAGE").unwrap_or(base.gemini.language),
            },
            market_data: MarketDataConfig {
                demo_mode: flag("DEMO_MODE").unwrap_or(base.market_data.demo_mode),
                candle_limit: parsed("CANDLE_LIMIT").unwrap_or(base.market_data.candle_limit),
                mock_start_price: parsed("MOCK_START_PRICE")
                    .unwrap_or(base.market_data.mock_start_price),
                bybit_base_url: env::var("BYBIT_BASE_URL")
                    .unwrap_or(base.market_data.bybit_base_url),
                candle_cache_ttl_secs: parsed("CANDLE_CACHE_TTL_SECS")
                    .unwrap_or(base.market_data.candle_cache_ttl_secs),
                ema_seed,
            },
            defaults: AnalysisDefaults {
                symbol: env::var("DEFAULT_SYMBOL").unwrap_or(base.defaults.symbol),
                capital: parsed("DEFAULT_CAPITAL").unwrap_or(base.defaults.capital),
                risk_pct: parsed("DEFAULT_RISK_PCT").unwrap_or(base.defaults.risk_pct),
                timeframes,
            },
        }
    }
}
