//! Session transport
//!
//! Asynchronous access to the chat backend. Every call resolves to a
//! [`RemoteResult`]; nothing below this module panics on bad responses.

mod error;
mod http;
mod types;

pub use error::{RemoteError, RemoteResult};
pub use http::HttpTransport;
pub use types::{ChatReply, ProfileReply, SessionStart};

use async_trait::async_trait;
use std::sync::Arc;

/// The three backend operations the conversation depends on
#[async_trait]
pub trait SessionTransport: Send + Sync {
    /// Open a new server-side session
    async fn start_session(&self) -> RemoteResult<SessionStart>;

    /// Send one user turn
    async fn send_message(&self, text: &str) -> RemoteResult<ChatReply>;

    /// Ask the server to build the profile from the accumulated session
    async fn request_profile(&self) -> RemoteResult<ProfileReply>;
}

#[async_trait]
impl<T: SessionTransport + ?Sized> SessionTransport for Arc<T> {
    async fn start_session(&self) -> RemoteResult<SessionStart> {
        (**self).start_session().await
    }

    async fn send_message(&self, text: &str) -> RemoteResult<ChatReply> {
        (**self).send_message(text).await
    }

    async fn request_profile(&self) -> RemoteResult<ProfileReply> {
        (**self).request_profile().await
    }
}

/// Logging wrapper for transports
pub struct LoggingTransport {
    inner: Arc<dyn SessionTransport>,
}

impl LoggingTransport {
    pub fn new(inner: Arc<dyn SessionTransport>) -> Self {
        Self { inner }
    }

    fn log<T>(operation: &'static str, started: std::time::Instant, result: &RemoteResult<T>) {
        let duration = started.elapsed();
        match result {
            Ok(_) => {
                tracing::info!(
                    operation,
                    duration_ms = %duration.as_millis(),
                    "Backend call completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    operation,
                    duration_ms = %duration.as_millis(),
                    kind = e.kind(),
                    error = %e,
                    "Backend call failed"
                );
            }
        }
    }
}

#[async_trait]
impl SessionTransport for LoggingTransport {
    async fn start_session(&self) -> RemoteResult<SessionStart> {
        let start = std::time::Instant::now();
        let result = self.inner.start_session().await;
        Self::log("start_session", start, &result);
        result
    }

    async fn send_message(&self, text: &str) -> RemoteResult<ChatReply> {
        let start = std::time::Instant::now();
        let result = self.inner.send_message(text).await;
        Self::log("send_message", start, &result);
        if let Ok(reply) = &result {
            tracing::debug!(
                session_restarted = reply.session_restarted,
                end_of_quiz_phase_reached = reply.end_of_quiz_phase_reached,
                "Chat reply flags"
            );
        }
        result
    }

    async fn request_profile(&self) -> RemoteResult<ProfileReply> {
        let start = std::time::Instant::now();
        let result = self.inner.request_profile().await;
        Self::log("request_profile", start, &result);
        result
    }
}
