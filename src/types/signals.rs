use serde::{Deserialize, Serialize};

/// Overall call of the signal model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalVerdict {
    Long,
    Short,
    Neutral,
    Lateral,
}

/// Side of the proposed position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Long,
    Short,
}

/// Setup type of the proposed trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeMode {
    Continuation,
    Pullback,
    Reversal,
    Scalp,
}

/// Structured trading signal returned by the language model.
///
/// Every field is required; `side` must be present even when `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalResponse {
    pub verdict: SignalVerdict,
    pub confidence: f64,
    #[serde(deserialize_with = "Option::deserialize")]
    pub side: Option<TradeSide>,
    pub mode: TradeMode,
    pub entry: f64,
    pub entry_zone_low: f64,
    pub entry_zone_high: f64,
    pub sl: f64,
    pub sl_reasoning: String,
    pub tp1: f64,
    pub tp1_reasoning: String,
    pub tp2: f64,
    pub tp3: f64,
    pub rr1: f64,
    pub rr2: f64,
    pub rr3: f64,
    pub position_size: f64,
    pub leverage: f64,
    pub trailing_stop_pct: f64,
    pub trigger_conditions: String,
    pub market_narrative: String,
    pub timeframe_conflict: String,
    pub thesis: String,
    pub bull_case: String,
    pub bear_case: String,
    pub risk_factors: Vec<String>,
    pub strengths: Vec<String>,
}

impl SignalResponse {
    /// Check value ranges that the JSON schema alone cannot express.
    pub fn validate(&self) -> Result<(), String> {
        let numbers = [
            ("confidence", self.confidence),
            ("entry", self.entry),
            ("entry_zone_low", self.entry_zone_low),
            ("entry_zone_high", self.entry_zone_high),
            ("sl", self.sl),
            ("tp1", self.tp1),
            ("tp2", self.tp2),
            ("tp3", self.tp3),
            ("rr1", self.rr1),
            ("rr2", self.rr2),
            ("rr3", self.rr3),
            ("position_size", self.position_size),
            ("leverage", self.leverage),
            ("trailing_stop_pct", self.trailing_stop_pct),
        ];
        if let Some((name, _)) = numbers.iter().find(|(_, v)| !v.is_finite()) {
            return Err(format!("field `{}` is not a finite number", name));
        }

        if !(0.0..=100.0).contains(&self.confidence) {
            return Err(format!("confidence {} outside 0-100", self.confidence));
        }
        if !(1.0..=20.0).contains(&self.leverage) {
            return Err(format!("leverage {} outside 1-20", self.leverage));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> serde_json::Value {
        serde_json::json!({
            "verdict": "LONG",
            "confidence": 72,
            "side": "long",
            "mode": "pullback",
            "entry": 43250.0,
            "entry_zone_low": 43000.0,
            "entry_zone_high": 43400.0,
            "sl": 42500.0,
            "sl_reasoning": "below the 4h swing low",
            "tp1": 44000.0,
            "tp1_reasoning": "prior range high",
            "tp2": 44800.0,
            "tp3": 45500.0,
            "rr1": 1.0,
            "rr2": 2.1,
            "rr3": 3.0,
            "position_size": 0.03,
            "leverage": 5,
            "trailing_stop_pct": 1.5,
            "trigger_conditions": "1h close above EMA20",
            "market_narrative": "trend intact",
            "timeframe_conflict": "aligned",
            "thesis": "buy the dip",
            "bull_case": "breakout",
            "bear_case": "range breakdown",
            "risk_factors": ["macro news"],
            "strengths": ["MACD positive"]
        })
    }

    #[test]
    fn test_signal_deserialization() {
        let signal: SignalResponse = serde_json::from_value(sample_json()).unwrap();
        assert_eq!(signal.verdict, SignalVerdict::Long);
        assert_eq!(signal.side, Some(TradeSide::Long));
        assert_eq!(signal.mode, TradeMode::Pullback);
        assert_eq!(signal.leverage, 5.0);
        assert!(signal.validate().is_ok());
    }

    #[test]
    fn test_null_side() {
        let mut json = sample_json();
        json["side"] = serde_json::Value::Null;
        json["verdict"] = "NEUTRAL".into();
        let signal: SignalResponse = serde_json::from_value(json).unwrap();
        assert_eq!(signal.side, None);
        assert_eq!(signal.verdict, SignalVerdict::Neutral);
    }

    #[test]
    fn test_missing_side_is_rejected() {
        let mut json = sample_json();
        json.as_object_mut().unwrap().remove("side");
        assert!(serde_json::from_value::<SignalResponse>(json).is_err());
    }

    #[test]
    fn test_unknown_verdict_is_rejected() {
        let mut json = sample_json();
        json["verdict"] = "BUY".into();
        assert!(serde_json::from_value::<SignalResponse>(json).is_err());
    }

    #[test]
    fn test_validate_confidence_range() {
        let mut signal: SignalResponse = serde_json::from_value(sample_json()).unwrap();
        signal.confidence = 120.0;
        assert!(signal.validate().unwrap_err().contains("confidence"));
    }

    #[test]
    fn test_validate_leverage_range() {
        let mut signal: SignalResponse = serde_json::from_value(sample_json()).unwrap();
        signal.leverage = 50.0;
        assert!(signal.validate().unwrap_err().contains("leverage"));
    }

    #[test]
    fn test_validate_non_finite() {
        let mut signal: SignalResponse = serde_json::from_value(sample_json()).unwrap();
        signal.tp2 = f64::NAN;
        assert!(signal.validate().unwrap_err().contains("tp2"));
    }
}
