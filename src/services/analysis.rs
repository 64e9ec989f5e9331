//! One end-to-end analysis run: candles, indicators, then an LLM signal.

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::services::assembler::MarketDataAssembler;
use crate::services::cache::CandleCache;
use crate::services::gemini::GeminiClient;
use crate::services::indicators::IndicatorEngine;
use crate::sources::{BybitClient, CandleProvider, MockSource};
use crate::types::{AnalysisReport, AnalysisRequest, MarketDataSummary, Timeframe};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

/// Fully resolved parameters of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunParams {
    pub symbol: String,
    pub capital: f64,
    pub risk: f64,
    pub timeframes: Vec<Timeframe>,
    pub model: String,
    pub demo_mode: bool,
}

pub struct AnalysisService {
    config: Arc<Config>,
    cache: Arc<CandleCache>,
    live: MarketDataAssembler,
    demo: MarketDataAssembler,
    gemini: GeminiClient,
}

impl AnalysisService {
    pub fn new(config: Arc<Config>) -> Self {
        let timeout = Duration::from_secs(config.http_timeout_secs);
        let market = &config.market_data;
        let engine = IndicatorEngine::new(market.ema_seed);
        let cache = Arc::new(CandleCache::new(Duration::from_secs(
            market.candle_cache_ttl_secs,
        )));

        let live = MarketDataAssembler::new(
            CandleProvider::Exchange {
                client: BybitClient::new(market.bybit_base_url.clone(), timeout),
                cache: cache.clone(),
            },
            engine,
            market.candle_limit,
        );
        let demo = MarketDataAssembler::new(
            CandleProvider::Mock(MockSource::new(market.mock_start_price)),
            engine,
            market.candle_limit,
        );
        let gemini = GeminiClient::new(&config.gemini, timeout);

        Self {
            config,
            cache,
            live,
            demo,
            gemini,
        }
    }

    /// Replace the demo source, e.g. with a seeded one.
    pub fn with_mock_source(mut self, source: MockSource) -> Self {
        self.demo = MarketDataAssembler::new(
            CandleProvider::Mock(source),
            self.demo.engine(),
            self.config.market_data.candle_limit,
        );
        self
    }

    pub fn candle_cache(&self) -> Arc<CandleCache> {
        self.cache.clone()
    }

    fn assembler(&self, demo_mode: bool) -> &MarketDataAssembler {
        if demo_mode {
            &self.demo
        } else {
            &self.live
        }
    }

    /// Merge request overrides over the configured defaults and validate them.
    pub fn resolve(&self, request: AnalysisRequest) -> Result<RunParams> {
        let defaults = &self.config.defaults;

        let symbol = request
            .symbol
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| defaults.symbol.clone());
        if symbol.is_empty() {
            return Err(AppError::BadRequest("Symbol must not be empty".to_string()));
        }

        let capital = request.capital.unwrap_or(defaults.capital);
        if !capital.is_finite() || capital <= 0.0 {
            return Err(AppError::BadRequest(format!(
                "Capital must be positive, got {}",
                capital
            )));
        }

        let risk = request.risk.unwrap_or(defaults.risk_pct);
        if !risk.is_finite() || risk <= 0.0 || risk > 100.0 {
            return Err(AppError::BadRequest(format!(
                "Risk must be in (0, 100] percent, got {}",
                risk
            )));
        }

        let timeframes = match request.timeframes {
            Some(list) => dedup(list),
            None => defaults.timeframes.clone(),
        };
        if timeframes.is_empty() {
            return Err(AppError::BadRequest(
                "At least one timeframe is required".to_string(),
            ));
        }

        let model = request
            .model
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| self.config.gemini.model.clone());

        Ok(RunParams {
            symbol,
            capital,
            risk,
            timeframes,
            model,
            demo_mode: request
                .demo_mode
                .unwrap_or(self.config.market_data.demo_mode),
        })
    }

    /// Run a complete analysis and return the report.
    pub async fn run(&self, request: AnalysisRequest) -> Result<AnalysisReport> {
        let params = self.resolve(request)?;
        if !self.gemini.has_credential() {
            return Err(AppError::MissingCredential(
                "GEMINI_API_KEY is not configured".to_string(),
            ));
        }
        let id = Uuid::new_v4().to_string();
        let span = info_span!("analysis", run_id = %id, symbol = %params.symbol);

        async move {
            info!(
                timeframes = params.timeframes.len(),
                demo = params.demo_mode,
                model = %params.model,
                "Starting analysis run"
            );

            let market_data = self
                .assembler(params.demo_mode)
                .assemble(&params.symbol, &params.timeframes)
                .await?;

            let signal = self
                .gemini
                .request_signal(
                    &params.model,
                    &params.symbol,
                    params.capital,
                    params.risk,
                    &market_data,
                )
                .await?;

            info!(
                verdict = ?signal.verdict,
                confidence = signal.confidence,
                "Analysis run complete"
            );

            Ok(AnalysisReport {
                id,
                symbol: params.symbol,
                model: params.model,
                capital: params.capital,
                risk: params.risk,
                generated_at: chrono::Utc::now(),
                inputs: market_data.iter().map(|md| md.summary()).collect(),
                signal,
            })
        }
        .instrument(span)
        .await
    }

    /// Indicator summaries only, without asking the model.
    pub async fn indicators(
        &self,
        symbol: &str,
        timeframes: Option<Vec<Timeframe>>,
        demo_mode: Option<bool>,
    ) -> Result<Vec<MarketDataSummary>> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(AppError::BadRequest("Symbol must not be empty".to_string()));
        }
        let timeframes = timeframes
            .map(dedup)
            .unwrap_or_else(|| self.config.defaults.timeframes.clone());
        let demo_mode = demo_mode.unwrap_or(self.config.market_data.demo_mode);

        let market_data = self
            .assembler(demo_mode)
            .assemble(symbol, &timeframes)
            .await?;
        Ok(market_data.iter().map(|md| md.summary()).collect())
    }
}

fn dedup(list: Vec<Timeframe>) -> Vec<Timeframe> {
    let mut out: Vec<Timeframe> = Vec::with_capacity(list.len());
    for tf in list {
        if !out.contains(&tf) {
            out.push(tf);
        }
    }
    out
}
