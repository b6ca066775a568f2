//! Wire types and the transport trait for the AI service.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The request never produced a response (connect, timeout, body read).
    #[error("AI request failed: {0}")]
    Request(String),

    /// The service answered with a non-success status.
    #[error("AI service returned status {status}")]
    Status { status: u16, body: String },

    /// The body was not `{result: ...}` JSON.
    #[error("AI response parse failed: {0}")]
    Parse(String),

    /// `result` had the wrong shape for the action.
    #[error("unexpected result for {action}: {detail}")]
    UnexpectedResult { action: AiAction, detail: String },
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AiAction {
    /// Split a task into 3 to 6 sub-tasks. Result is a string list.
    DecomposeTask,
    /// One creative pick for a category. Result is a string.
    GetPickSuggestion,
}

impl AiAction {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DecomposeTask => "decomposeTask",
            Self::GetPickSuggestion => "getPickSuggestion",
        }
    }
}

impl std::fmt::Display for AiAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize)]
pub struct AiRequest<'a> {
    pub action: AiAction,
    pub payload: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct AiResponse {
    pub result: Value,
}

/// Parse a response body into its `result` value.
///
/// # Errors
///
/// Returns [`AiError::Parse`] if the body is not JSON or lacks `result`.
pub fn parse_response(text: &str) -> Result<Value, AiError> {
    serde_json::from_str::<AiResponse>(text)
        .map(|r| r.result)
        .map_err(|e| AiError::Parse(e.to_string()))
}

// =============================================================================
// TRANSPORT TRAIT
// =============================================================================

/// Async transport to the AI service. Enables mocking in tests.
#[async_trait::async_trait]
pub trait AiTransport: Send + Sync {
    /// Send one action and return the raw `result` value.
    ///
    /// # Errors
    ///
    /// Returns an [`AiError`] if the request fails, the service answers with
    /// a non-success status, or the body is malformed.
    async fn call(&self, action: AiAction, payload: &str) -> Result<Value, AiError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
