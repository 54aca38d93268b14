// API Client implementation
// Один HTTP запрос -> разобранный JSON или типизированная ошибка

use log::{debug, warn};
use reqwest::{Client, Method, header::CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value;

use super::errors::{ApiError, ClientError};
use super::query::QueryParams;

pub const JSON_CONTENT_TYPE: &str = "application/json;charset=utf-8";

#[derive(Debug, Clone, Default)]
pub struct APIClient {
    client: Client,
}

impl APIClient {
    pub fn new() -> Self {
        APIClient {
            client: Client::new(),
        }
    }

    pub fn with_client(client: Client) -> Self {
        APIClient { client }
    }

    /// Execute one request and parse the body as JSON, whatever the status.
    ///
    /// Non-2xx responses become [`ClientError::Api`] carrying the upstream
    /// `error`/`message` fields. Connection failures come back untouched as
    /// [`ClientError::Transport`]. No retries.
    pub async fn perform_request(
        &self,
        method: Method,
        url: &str,
        body: Option<String>,
    ) -> Result<Value, ClientError> {
        debug!("{} {}", method, url);

        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, JSON_CONTENT_TYPE).body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let api_error = match serde_json::from_str::<Value>(&text) {
                Ok(body) => ApiError::from_body(&body, status.as_u16()),
                Err(_) => ApiError::from_text(&text, status.as_u16()),
            };
            warn!("⚠️ {} -> {}", url, api_error);
            return Err(api_error.into());
        }

        Ok(serde_json::from_str(&text)?)
    }

    pub async fn get_json(&self, base_url: &str, query: &QueryParams) -> Result<Value, ClientError> {
        let url = query.append_to(base_url);
        self.perform_request(Method::GET, &url, None).await
    }

    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<Value, ClientError> {
        let payload = serde_json::to_string(body)?;
        self.perform_request(Method::POST, url, Some(payload)).await
    }
}
