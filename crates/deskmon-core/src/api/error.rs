//! Error types for the auth API client.

use serde::{Deserialize, Serialize};

/// Classification of API failures.
///
/// Derived from what actually happened on the wire, so callers can map
/// each kind to a user-facing message without inspecting message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    /// The request never produced an HTTP response.
    Network,
    /// HTTP 409, the resource already exists.
    Conflict,
    /// HTTP 400 or 422, the server rejected the payload.
    Validation,
    /// Any HTTP 5xx.
    ServerFault,
    /// Anything else, including undecodable success bodies.
    Unknown,
}

impl ApiErrorKind {
    fn from_status(status: u16) -> Self {
        match status {
            409 => Self::Conflict,
            400 | 422 => Self::Validation,
            500..=599 => Self::ServerFault,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Network => "network",
            Self::Conflict => "conflict",
            Self::Validation => "validation",
            Self::ServerFault => "server_fault",
            Self::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}

/// A failure talking to the auth API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// What class of failure this is.
    pub kind: ApiErrorKind,
    /// Human-readable message extracted from the response where possible.
    pub message: String,
    /// Raw response body, when one was received.
    pub detail: Option<String>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            detail: None,
        }
    }

    /// A transport-level failure (connect, DNS, timeout).
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Network, message)
    }

    /// A 2xx response whose body could not be decoded.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Unknown, message)
    }

    /// Builds an error from a non-success HTTP response.
    ///
    /// Prefers the body's `detail` field, then `message`, then a generic
    /// status line. The raw body is kept in `detail` for logging.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = extract_error_message(body)
            .unwrap_or_else(|| format!("HTTP error! status: {status}"));

        Self {
            kind: ApiErrorKind::from_status(status),
            message,
            detail: (!body.is_empty()).then(|| body.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

/// Pulls a displayable message out of a JSON error body.
fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;

    if let Some(detail) = value.get("detail")
        && let Some(s) = detail.as_str()
    {
        return Some(s.to_string());
    }

    if let Some(message) = value.get("message")
        && let Some(s) = message.as_str()
    {
        return Some(s.to_string());
    }

    None
}
