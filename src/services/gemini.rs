//! Trading-signal requests to the Gemini `generateContent` REST API.

use crate::config::GeminiConfig;
use crate::error::{body_preview, AppError, Result};
use crate::types::{prompt_payload, MarketData, SignalResponse};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// JSON shape the model must answer with, embedded in the prompt.
const RESPONSE_SCHEMA: &str = r#"{
  "verdict": "LONG|SHORT|NEUTRAL",
  "confidence": 0-100,
  "side": "long|short|null",
  "mode": "continuation|pullback|reversal|scalp",
  "entry": number,
  "entry_zone_low": number,
  "entry_zone_high": number,
  "sl": number,
  "sl_reasoning": "short technical reason for the stop loss",
  "tp1": number,
  "tp1_reasoning": "technical reason for target 1",
  "tp2": number,
  "tp3": number,
  "rr1": number,
  "rr2": number,
  "rr3": number,
  "position_size": number,
  "leverage": number (1-20),
  "trailing_stop_pct": number,
  "trigger_conditions": "exact entry trigger",
  "market_narrative": "detailed macro and micro reading explaining the decision with analogies",
  "timeframe_conflict": "alignment or conflict between the analysed timeframes",
  "thesis": "main trade thesis, summarised creatively",
  "bull_case": "bullish scenario",
  "bear_case": "bearish scenario",
  "risk_factors": ["risk factor 1", "risk factor 2"],
  "strengths": ["strength 1", "strength 2"]
}"#;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

/// Build the analysis prompt for `symbol` from per-timeframe market data.
pub fn build_prompt(
    symbol: &str,
    capital: f64,
    risk_pct: f64,
    language: &str,
    market_data: &[MarketData],
) -> Result<String> {
    let payload = serde_json::to_string_pretty(&prompt_payload(market_data)?)?;

    Ok(format!(
        r#"You are a senior crypto algo-trading strategist specialised in risk management and institutional technical analysis.
Analyse {symbol} for a capital of ${capital} and a risk per trade of {risk_pct}%.

TECHNICAL DATA (multiple timeframes):
{payload}

TASK:
Provide a professional trading signal based strictly on the data above.

RESPONSE STYLE:
Informal and didactic. Use creative analogies to explain market moves (e.g. "price is stretched like a rubber band", "the bears are hibernating"). Be direct but educational.

OUTPUT LANGUAGE:
{language} for every text field.

OUTPUT FORMAT:
Reply ONLY with a valid JSON object (no markdown, no code fences) following exactly this structure:
{schema}
"#,
        symbol = symbol,
        capital = capital,
        risk_pct = risk_pct,
        payload = payload,
        language = language,
        schema = RESPONSE_SCHEMA,
    ))
}

/// Remove markdown code fences the model sometimes wraps JSON in.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open
        .strip_suffix("```")
        .unwrap_or(without_open)
        .trim()
}

/// Parse and validate the model's answer.
pub fn parse_signal_response(text: &str) -> Result<SignalResponse> {
    let json = strip_code_fences(text);
    if json.is_empty() {
        return Err(AppError::MalformedResponse("empty response".to_string()));
    }

    let signal: SignalResponse =
        serde_json::from_str(json).map_err(|e| AppError::MalformedResponse(e.to_string()))?;
    signal.validate().map_err(AppError::MalformedResponse)?;
    Ok(signal)
}

/// Gemini REST client.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    temperature: f64,
    language: String,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            temperature: config.temperature,
            language: config.language.clone(),
        }
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Ask `model` for a signal on `symbol` given the assembled market data.
    pub async fn request_signal(
        &self,
        model: &str,
        symbol: &str,
        capital: f64,
        risk_pct: f64,
        market_data: &[MarketData],
    ) -> Result<SignalResponse> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AppError::MissingCredential("GEMINI_API_KEY is not configured".to_string())
        })?;

        let prompt = build_prompt(symbol, capital, risk_pct, &self.language, market_data)?;
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: &prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                response_mime_type: "application/json",
            },
        };

        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, model);
        debug!("Requesting signal from {} ({} chars of prompt)", url, prompt.len());

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(
                "Gemini API returned {}: {}",
                status,
                body_preview(&text)
            );
            return Err(AppError::ExternalApi(format!(
                "Gemini API error: {}",
                status
            )));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AppError::MalformedResponse(e.to_string()))?;

        parse_signal_response(&body.text())
    }
}
