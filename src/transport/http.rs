//! HTTP transport backed by reqwest

use super::types::{ChatReply, ChatRequest, ProfileReply, SessionStart};
use super::{RemoteError, RemoteResult, SessionTransport};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;

const START_SESSION_PATH: &str = "/api/start_session";
const CHAT_PATH: &str = "/api/chat";
const GENERATE_PROFILE_PATH: &str = "/api/generate_profile";

/// Transport speaking to the chat backend over HTTP.
///
/// The backend keeps the conversation in a cookie-bound session, so the
/// client owns a cookie jar shared by every call (including the report
/// download after navigation).
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder().cookie_store(true);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetch a document (the report page) with the current session
    pub async fn fetch_document(&self, url: &str) -> RemoteResult<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(RemoteError::from_response(status, &body));
        }
        Ok(body)
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> RemoteResult<T> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), body = %body, "Backend returned failure status");
            return Err(RemoteError::from_response(status, &body));
        }

        serde_json::from_str(&body)
            .map_err(|e| RemoteError::transport(format!("Failed to parse response: {e}")))
    }
}

#[async_trait]
impl SessionTransport for HttpTransport {
    async fn start_session(&self) -> RemoteResult<SessionStart> {
        self.execute(self.client.get(self.endpoint(START_SESSION_PATH)))
            .await
    }

    async fn send_message(&self, text: &str) -> RemoteResult<ChatReply> {
        self.execute(
            self.client
                .post(self.endpoint(CHAT_PATH))
                .json(&ChatRequest { message: text }),
        )
        .await
    }

    async fn request_profile(&self) -> RemoteResult<ProfileReply> {
        // The server works from the session history; no body is sent
        self.execute(
            self.client
                .post(self.endpoint(GENERATE_PROFILE_PATH))
                .header(CONTENT_TYPE, "application/json"),
        )
        .await
    }
}
