//! Transport error types

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Outcome of a remote call, normalised before it reaches the controller
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Failure of a remote call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// No usable response was obtained (connect, DNS, timeout, unreadable body)
    #[error("{message}")]
    Transport { message: String },

    /// The server answered with a non-success status
    #[error("{}", http_message(.status, .message))]
    Http {
        status: u16,
        /// `error` field of the response body, when it could be parsed
        message: Option<String>,
    },
}

impl RemoteError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn http(status: u16, message: Option<String>) -> Self {
        Self::Http { status, message }
    }

    /// Build an HTTP error from a failed response, reading `{"error": ...}`
    /// from the body when possible.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .filter(|m| !m.trim().is_empty());
        Self::http(status.as_u16(), message)
    }

    /// Message supplied by the server, if any
    #[cfg(test)]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Http { message, .. } => message.as_deref(),
            Self::Transport { .. } => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "transport",
            Self::Http { .. } => "http",
        }
    }
}

#[allow(clippy::ref_option, clippy::trivially_copy_pass_by_ref)] // called from the thiserror attribute
fn http_message(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(m) => m.clone(),
        None => format!("HTTP {status}"),
    }
}

/// Error body shape shared by every endpoint
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

impl From<reqwest::Error> for RemoteError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::transport(format!("Request timeout: {e}"))
        } else if e.is_connect() {
            Self::transport(format!("Connection failed: {e}"))
        } else if e.is_decode() || e.is_body() {
            Self::transport(format!("Failed to read response: {e}"))
        } else {
            Self::transport(format!("Request failed: {e}"))
        }
    }
}
