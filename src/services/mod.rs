pub mod analysis;
pub mod assembler;
pub mod cache;
pub mod gemini;
pub mod indicators;
pub mod mock;

pub use analysis::{AnalysisService, RunParams};
pub use assembler::MarketDataAssembler;
pub use cache::CandleCache;
pub use gemini::{build_prompt, parse_signal_response, GeminiClient};
pub use indicators::{IndicatorEngine, IndicatorError};
pub use mock::{generate_mock_candles, MockCandleGenerator};
