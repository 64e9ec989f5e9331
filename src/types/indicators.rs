use serde::{Deserialize, Serialize};

/// MACD snapshot for the most recent bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacdValues {
    pub value: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// Last value of each tracked EMA period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EmaSet {
    pub ema9: f64,
    pub ema20: f64,
    pub ema50: f64,
    pub ema200: f64,
}

/// Bollinger Bands snapshot. `width` is `(upper - lower) / middle`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BollingerValues {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
    pub width: f64,
}

/// Indicator snapshot computed from one candle sequence.
///
/// Field names are part of the prompt contract and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TechnicalIndicators {
    pub rsi: f64,
    pub macd: MacdValues,
    pub ema: EmaSet,
    pub bollinger: BollingerValues,
    pub atr: f64,
}
