//! AI suggestion service client.
//!
//! DESIGN
//! ======
//! The service is a single POST endpoint taking `{action, payload}` and
//! answering `{result}`. [`AiTransport`] hides the HTTP hop so services can
//! be tested against a mock; [`HttpAiClient`] is the real transport.
//! Fallback-on-failure lives one layer up in `services::ai`.

pub mod http;
pub mod types;

pub use http::HttpAiClient;
pub use types::{AiAction, AiError, AiTransport};
