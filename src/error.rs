use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::indicators::IndicatorError;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl From<IndicatorError> for AppError {
    fn from(err: IndicatorError) -> Self {
        match err {
            IndicatorError::InvalidInput(msg) => AppError::InvalidInput(msg),
        }
    }
}

impl AppError {
    /// HTTP status reported for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MissingCredential(_) => StatusCode::UNAUTHORIZED,
            AppError::ExternalApi(_) | AppError::MalformedResponse(_) | AppError::Reqwest(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::Internal(_) | AppError::SerdeJson(_) | AppError::Anyhow(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Characters of an upstream error body kept in log lines.
const BODY_PREVIEW_CHARS: usize = 200;

/// Leading part of an upstream response body for logging, cut on a char boundary.
pub fn body_preview(text: &str) -> String {
    text.chars().take(BODY_PREVIEW_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::InvalidInput("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::MissingCredential("x".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::MalformedResponse("x".into()).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::Internal("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_body_preview_cuts_on_char_boundary() {
        let body = format!("{}é tail", "a".repeat(199));
        let preview = body_preview(&body);
        assert_eq!(preview.chars().count(), 200);
        assert!(preview.ends_with('é'));
        assert_eq!(body_preview("short"), "short");
    }

    #[test]
    fn test_indicator_error_conversion() {
        let err: AppError = IndicatorError::InvalidInput("empty".into()).into();
        assert!(matches!(err, AppError::InvalidInput(ref m) if m == "empty"));
        assert_eq!(err.to_string(), "Invalid input: empty");
    }

    #[tokio::test]
    async fn test_error_response_body() {
        let response = AppError::NotFound("no candles for 1h".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], 404);
        assert_eq!(body["error"], "Not found: no candles for 1h");
    }
}
