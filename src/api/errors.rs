//! Ошибки HTTP клиента ChangeNOW
//! Транспортные ошибки пробрасываются как есть, ответы вне 2xx превращаются в ApiError

use std::fmt;

use serde_json::Value;

/// Structured failure reported by the upstream API for a non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Upstream `error` field, e.g. `bad_request`.
    pub kind: Option<String>,
    /// Upstream `message` field, empty when the body had none.
    pub detail: String,
    pub status: u16,
}

impl ApiError {
    /// Build from a parsed error body plus the transport status code.
    pub fn from_body(body: &Value, status: u16) -> Self {
        let kind = body.get("error").and_then(|v| v.as_str()).map(str::to_string);
        let detail = body
            .get("message")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();

        Self { kind, detail, status }
    }

    /// Error body that was not JSON at all: keep the raw text as the detail.
    pub fn from_text(text: &str, status: u16) -> Self {
        Self {
            kind: None,
            detail: text.trim().to_string(),
            status,
        }
    }

    pub fn kind_or_unknown(&self) -> &str {
        self.kind.as_deref().unwrap_or("unknown")
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, message: {} (status {})",
            self.kind_or_unknown(),
            self.detail,
            self.status
        )
    }
}

impl std::error::Error for ApiError {}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("API error: {0}")]
    Api(ApiError),
    #[error("Invalid JSON response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Undefined api method: {0}")]
    UnknownOperation(String),
    #[error("Missing required parameter: {0}")]
    MissingParam(&'static str),
    #[error("Invalid value '{value}' for parameter {key}")]
    InvalidParam { key: String, value: String },
    #[error("Field not found in response: {0}")]
    MissingField(String),
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl From<ApiError> for ClientError {
    fn from(err: ApiError) -> Self {
        ClientError::Api(err)
    }
}

impl ClientError {
    /// Upstream error record, when the failure came from a non-2xx response.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            ClientError::Api(err) => Some(err),
            _ => None,
        }
    }
}
