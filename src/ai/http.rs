//! HTTP transport for the AI service.

use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use super::types::{AiAction, AiError, AiRequest, AiTransport, parse_response};
use crate::config::AiConfig;

pub struct HttpAiClient {
    http: reqwest::Client,
    url: String,
}

impl HttpAiClient {
    /// Build a client for `config.url` with the configured timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`AiError::HttpClientBuild`] if the HTTP client fails to build.
    pub fn new(config: &AiConfig) -> Result<Self, AiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| AiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, url: config.url.clone() })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl AiTransport for HttpAiClient {
    async fn call(&self, action: AiAction, payload: &str) -> Result<Value, AiError> {
        let body = AiRequest { action, payload };
        debug!(%action, url = %self.url, "ai: request");

        let response = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AiError::Request(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AiError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(AiError::Status { status: status.as_u16(), body: text });
        }

        parse_response(&text)
    }
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
