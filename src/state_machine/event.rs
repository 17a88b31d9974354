//! Events that can occur in a conversation

use crate::transport::{ChatReply, ProfileReply, RemoteError};

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The client came up and should open a session
    Launch,

    // User events
    UserSubmit {
        text: String,
    },
    /// "Generate my profile" pressed on the confirmation gate
    Affirm,
    /// "Keep chatting" pressed on the confirmation gate
    Defer,

    // Backend events
    SessionStarted {
        initial_message: String,
    },
    SessionStartFailed {
        error: RemoteError,
    },
    ChatReplied {
        reply: ChatReply,
    },
    ChatFailed {
        error: RemoteError,
    },
    ProfileReplied {
        reply: ProfileReply,
    },
    ProfileFailed {
        error: RemoteError,
    },
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::Launch => "launch",
            Event::UserSubmit { .. } => "user_submit",
            Event::Affirm => "affirm",
            Event::Defer => "defer",
            Event::SessionStarted { .. } => "session_started",
            Event::SessionStartFailed { .. } => "session_start_failed",
            Event::ChatReplied { .. } => "chat_replied",
            Event::ChatFailed { .. } => "chat_failed",
            Event::ProfileReplied { .. } => "profile_replied",
            Event::ProfileFailed { .. } => "profile_failed",
        }
    }

    /// Check if this event comes from the person at the keyboard
    pub fn is_user_action(&self) -> bool {
        matches!(
            self,
            Event::UserSubmit { .. } | Event::Affirm | Event::Defer
        )
    }
}
