//! Conversation state types

use serde::Serialize;
use std::time::Duration;

// ============================================================================
// Transcript Messages
// ============================================================================

/// Who authored a transcript turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
}

/// One transcript turn. Never mutated once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub text: String,
    pub sender: Sender,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
        }
    }
}

// ============================================================================
// Conversation State
// ============================================================================

/// Which kind of control the input surface offers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionMode {
    AwaitingText,
    AwaitingConfirmation,
    Busy,
}

/// Conversation state.
///
/// The pending-confirmation flag is not stored separately: it holds exactly
/// while the state is [`ConvState::AwaitingConfirmation`]. Every way out of
/// that state (affirm, defer, typed text) resolves the confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConvState {
    /// Not launched yet
    #[default]
    Idle,

    /// Session start request in flight
    Starting,

    /// Free-text entry mounted and enabled
    AwaitingText,

    /// Yes/no gate mounted after the backend signalled end of quiz phase
    AwaitingConfirmation,

    /// Chat message in flight
    Sending,

    /// Profile generation in flight
    GeneratingProfile,

    /// Session could not be started; nothing else is accepted
    StartFailed,

    /// Profile generated and navigation scheduled
    Terminal,
}

impl ConvState {
    pub fn mode(self) -> InteractionMode {
        match self {
            ConvState::AwaitingText => InteractionMode::AwaitingText,
            ConvState::AwaitingConfirmation => InteractionMode::AwaitingConfirmation,
            ConvState::Idle
            | ConvState::Starting
            | ConvState::Sending
            | ConvState::GeneratingProfile
            | ConvState::StartFailed
            | ConvState::Terminal => InteractionMode::Busy,
        }
    }

    /// Whether a shown confirmation gate is still unresolved
    pub fn pending_confirmation(self) -> bool {
        matches!(self, ConvState::AwaitingConfirmation)
    }

    /// Check if a backend call is outstanding
    pub fn is_in_flight(self) -> bool {
        matches!(
            self,
            ConvState::Starting | ConvState::Sending | ConvState::GeneratingProfile
        )
    }

    /// Check if this is a final state (no transition out)
    pub fn is_finished(self) -> bool {
        matches!(self, ConvState::StartFailed | ConvState::Terminal)
    }

    pub fn name(self) -> &'static str {
        match self {
            ConvState::Idle => "idle",
            ConvState::Starting => "starting",
            ConvState::AwaitingText => "awaiting_text",
            ConvState::AwaitingConfirmation => "awaiting_confirmation",
            ConvState::Sending => "sending",
            ConvState::GeneratingProfile => "generating_profile",
            ConvState::StartFailed => "start_failed",
            ConvState::Terminal => "terminal",
        }
    }
}

/// Delay before leaving the chat once the profile is ready
pub const NAVIGATION_DELAY: Duration = Duration::from_secs(2);

/// Context for a conversation (immutable configuration)
#[derive(Debug, Clone)]
pub struct ConvContext {
    /// Where to go once the profile has been generated
    pub report_destination: String,
    pub navigation_delay: Duration,
}

impl ConvContext {
    pub fn new(report_destination: impl Into<String>) -> Self {
        Self {
            report_destination: report_destination.into(),
            navigation_delay: NAVIGATION_DELAY,
        }
    }

    #[cfg(test)]
    pub fn with_navigation_delay(mut self, delay: Duration) -> Self {
        self.navigation_delay = delay;
        self
    }
}
