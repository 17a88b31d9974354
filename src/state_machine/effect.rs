//! Effects produced by state transitions

use super::state::Message;
use std::time::Duration;

/// Effects to be executed after state transition, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append a turn to the transcript
    AppendMessage { message: Message },

    /// Mount the free-text entry
    ShowTextEntry { placeholder: String },

    /// Mount the two-button confirmation gate
    ShowConfirmation { affirm: String, defer: String },

    /// Mount a non-interactive status line
    ShowBusy { status: String },

    /// Enable or disable every interactive element at once
    SetEnabled { enabled: bool },

    /// Open a backend session
    StartSession,

    /// Send a chat turn to the backend
    SendMessage { text: String },

    /// Ask the backend for the profile
    RequestProfile,

    /// One-shot, non-cancellable navigation after a delay
    ScheduleNavigation { destination: String, delay: Duration },
}

impl Effect {
    pub fn user_message(text: impl Into<String>) -> Self {
        Effect::AppendMessage {
            message: Message::user(text),
        }
    }

    pub fn bot_message(text: impl Into<String>) -> Self {
        Effect::AppendMessage {
            message: Message::bot(text),
        }
    }

    pub fn text_entry(placeholder: &str) -> Self {
        Effect::ShowTextEntry {
            placeholder: placeholder.to_string(),
        }
    }

    pub fn busy(status: &str) -> Self {
        Effect::ShowBusy {
            status: status.to_string(),
        }
    }

    pub fn enable() -> Self {
        Effect::SetEnabled { enabled: true }
    }

    pub fn disable() -> Self {
        Effect::SetEnabled { enabled: false }
    }

    /// Check if this effect issues a backend call
    #[cfg(test)]
    pub fn is_remote_call(&self) -> bool {
        matches!(
            self,
            Effect::StartSession | Effect::SendMessage { .. } | Effect::RequestProfile
        )
    }
}
