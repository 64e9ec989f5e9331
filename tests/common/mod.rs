//! Shared helpers for integration tests.

#![allow(dead_code)]

use axum::Router;
use serde_json::{json, Value};

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Install a global fmt subscriber so log arguments are actually formatted.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Error body whose 200th byte falls inside a two-byte character.
pub fn multibyte_error_body() -> Value {
    // `{"error":{"message":"` is 21 bytes, so 'é' spans bytes 199..201.
    json!({ "error": { "message": format!("{}é tail", "a".repeat(178)) } })
}

/// A complete, valid signal object as the model would return it.
pub fn signal_json() -> Value {
    json!({
        "verdict": "SHORT",
        "confidence": 64,
        "side": "short",
        "mode": "reversal",
        "entry": 50100.0,
        "entry_zone_low": 50000.0,
        "entry_zone_high": 50250.0,
        "sl": 50900.0,
        "sl_reasoning": "acima da máxima de 4h",
        "tp1": 49300.0,
        "tp1_reasoning": "suporte anterior",
        "tp2": 48800.0,
        "tp3": 48000.0,
        "rr1": 1.0,
        "rr2": 1.6,
        "rr3": 2.6,
        "position_size": 0.025,
        "leverage": 3,
        "trailing_stop_pct": 1.2,
        "trigger_conditions": "fechamento de 1h abaixo da EMA20",
        "market_narrative": "o preço está esticado como um elástico",
        "timeframe_conflict": "1h vendedor, 4h neutro",
        "thesis": "exaustão após alta",
        "bull_case": "rompimento da máxima",
        "bear_case": "perda da EMA50",
        "risk_factors": ["notícias macro"],
        "strengths": ["RSI sobrecomprado"]
    })
}

/// Wrap `text` in a Gemini `generateContent` response body.
pub fn gemini_body(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}
