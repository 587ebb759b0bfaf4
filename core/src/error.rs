//! Error types for the Roblox API client.
//!
//! # Design
//! Every failure surfaces as a single `ClientError`. Transport problems and
//! bodies that cannot be decoded land in `WebRequest`; an upstream `error`
//! payload becomes `GenericRequest` without its detail being inspected; batch
//! limits are checked locally and reported as `RequestTooLarge` before any
//! request is sent.

use thiserror::Error;

/// Errors returned by every client operation.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The HTTP exchange failed, or the response body could not be decoded
    /// into the shape the endpoint documents.
    #[error("web request failed: {message}")]
    WebRequest { message: String },

    /// The upstream response carried an `error` payload.
    #[error("request was unsuccessful")]
    GenericRequest,

    /// A batch parameter exceeded the upstream limit.
    #[error("{parameter} exceeded {limit} items ({count} given), this is an API limitation")]
    RequestTooLarge {
        parameter: &'static str,
        limit: usize,
        count: usize,
    },

    /// A profile field path is not part of the known profile schema.
    #[error("unknown profile field: {path}")]
    UnknownField { path: String },
}

impl ClientError {
    pub(crate) fn web_request(message: impl Into<String>) -> Self {
        ClientError::WebRequest {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::web_request(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::web_request(err.to_string())
    }
}
