//! HTTP transport types.
//!
//! # Design
//! Requests and responses are described as plain data. The client core builds
//! `HttpRequest` values and decodes `HttpResponse` values without touching the
//! network; a [`Transport`](crate::transport::Transport) executes the actual
//! round-trip. Building and decoding stay deterministic and testable.

use serde_json::Value;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Head,
    Options,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request body before encoding.
///
/// Objects and arrays are sent as JSON; other values are sent as plain text.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Text(String),
}

impl Payload {
    /// Classify a JSON value the way the wire encoding needs it. `null`
    /// means no body at all.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Object(_) | Value::Array(_) => Some(Payload::Json(value)),
            Value::String(text) => Some(Payload::Text(text)),
            other => Some(Payload::Text(other.to_string())),
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Payload::Json(_) => CONTENT_TYPE_JSON,
            Payload::Text(_) => CONTENT_TYPE_TEXT,
        }
    }

    pub(crate) fn into_body(self) -> Result<String, serde_json::Error> {
        match self {
            Payload::Json(value) => serde_json::to_string(&value),
            Payload::Text(text) => Ok(text),
        }
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_string())
    }
}

pub(crate) const CONTENT_TYPE_JSON: &str = "application/json";
pub(crate) const CONTENT_TYPE_TEXT: &str = "text/plain";

/// An HTTP request described as plain data.
///
/// `url` is always fully qualified by the time a transport sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Case-insensitive header lookup; the last occurrence wins.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// Case-insensitive header lookup; the last occurrence wins.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    pub fn is_json(&self) -> bool {
        self.header("content-type")
            .is_some_and(|value| value.contains(CONTENT_TYPE_JSON))
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .rev()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}
