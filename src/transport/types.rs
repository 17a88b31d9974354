//! Request and response schemas for the chat backend

use serde::{Deserialize, Deserializer, Serialize};

/// `GET /api/start_session`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionStart {
    pub initial_message: String,
}

/// Body of `POST /api/chat`
#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub message: &'a str,
}

/// `POST /api/chat`
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub bot_response: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub session_restarted: bool,
    #[serde(default, deserialize_with = "flag")]
    pub end_of_quiz_phase_reached: bool,
    /// Notice sent together with a restarted session
    #[serde(default, rename = "error_message")]
    pub restart_notice: Option<String>,
}

impl ChatReply {
    /// A plain reply with neither flag set
    #[cfg(test)]
    pub fn text(bot_response: impl Into<String>) -> Self {
        Self {
            bot_response: Some(bot_response.into()),
            ..Self::default()
        }
    }

    /// Bot text to render, ignoring empty responses
    pub fn bot_text(&self) -> Option<&str> {
        non_empty(self.bot_response.as_deref())
    }

    pub fn notice(&self) -> Option<&str> {
        non_empty(self.restart_notice.as_deref())
    }
}

/// `POST /api/generate_profile`
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ProfileReply {
    #[serde(default, deserialize_with = "flag", rename = "profile_generation_complete")]
    pub complete: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ProfileReply {
    #[cfg(test)]
    pub fn completed(message: impl Into<String>) -> Self {
        Self {
            complete: true,
            message: Some(message.into()),
            error: None,
        }
    }

    #[cfg(test)]
    pub fn incomplete(error: Option<String>) -> Self {
        Self {
            complete: false,
            message: None,
            error,
        }
    }
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.trim().is_empty())
}

/// Boolean flag where `null` means absent
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}
