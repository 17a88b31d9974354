//! Pure state transition function

use super::strings;
use super::{ConvContext, ConvState, Effect, Event};
use crate::transport::{ChatReply, ProfileReply, RemoteError};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ConvState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ConvState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("A backend call is in flight, input is not accepted")]
    Busy,
    #[error("Message is empty")]
    EmptyMessage,
    #[error("Conversation has finished")]
    Finished,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function
///
/// Given the same inputs it always produces the same outputs; all I/O is
/// described by the returned effects. Any effect list that issues a backend
/// call disables the input surface first, and every result that returns
/// control to the user re-enables it after mounting the next control.
pub fn transition(
    state: &ConvState,
    context: &ConvContext,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (*state, event) {
        // ============================================================
        // Session start
        // ============================================================
        (ConvState::Idle, Event::Launch) => Ok(TransitionResult::new(ConvState::Starting)
            .with_effect(Effect::busy(strings::STARTING_STATUS))
            .with_effect(Effect::disable())
            .with_effect(Effect::StartSession)),

        (ConvState::Starting, Event::SessionStarted { initial_message }) => {
            Ok(TransitionResult::new(ConvState::AwaitingText)
                .with_effect(Effect::bot_message(initial_message))
                .with_effect(Effect::text_entry(strings::DEFAULT_PLACEHOLDER))
                .with_effect(Effect::enable()))
        }

        // Fatal for this run: no retry control, input stays disabled
        (ConvState::Starting, Event::SessionStartFailed { error }) => {
            let detail = match &error {
                RemoteError::Http {
                    status,
                    message: None,
                } => strings::http_status(*status),
                other => other.to_string(),
            };
            Ok(TransitionResult::new(ConvState::StartFailed)
                .with_effect(Effect::bot_message(strings::start_failed(&detail)))
                .with_effect(Effect::busy(strings::START_FAILED_STATUS)))
        }

        // ============================================================
        // User input
        // ============================================================

        // Typed text also resolves an open confirmation gate: it is sent as
        // an ordinary chat turn and the gate is dropped.
        (
            ConvState::AwaitingText | ConvState::AwaitingConfirmation,
            Event::UserSubmit { text },
        ) => {
            let text = text.trim();
            if text.is_empty() {
                return Err(TransitionError::EmptyMessage);
            }
            Ok(send_chat(text))
        }

        (ConvState::AwaitingConfirmation, Event::Affirm) => {
            Ok(TransitionResult::new(ConvState::GeneratingProfile)
                .with_effect(Effect::user_message(strings::AFFIRM_MESSAGE))
                .with_effect(Effect::busy(strings::GENERATING_STATUS))
                .with_effect(Effect::disable())
                .with_effect(Effect::RequestProfile))
        }

        // The deferral is forwarded as a normal turn so the backend can react
        (ConvState::AwaitingConfirmation, Event::Defer) => Ok(send_chat(strings::DEFER_MESSAGE)),

        (ConvState::AwaitingText, Event::Affirm | Event::Defer) => Err(
            TransitionError::InvalidTransition("no confirmation is pending".to_string()),
        ),

        (state, event) if state.is_in_flight() && event.is_user_action() => {
            Err(TransitionError::Busy)
        }

        // ============================================================
        // Chat replies
        // ============================================================
        (ConvState::Sending, Event::ChatReplied { reply }) => Ok(apply_chat_reply(&reply)),

        (ConvState::Sending, Event::ChatFailed { error }) => {
            let text = match &error {
                RemoteError::Http { status, message } => message
                    .clone()
                    .unwrap_or_else(|| strings::http_status(*status)),
                RemoteError::Transport { message } => strings::chat_transport_failed(message),
            };
            Ok(TransitionResult::new(ConvState::AwaitingText)
                .with_effect(Effect::bot_message(text))
                .with_effect(Effect::text_entry(strings::CHAT_RETRY_PLACEHOLDER))
                .with_effect(Effect::enable()))
        }

        // ============================================================
        // Profile generation
        // ============================================================
        (ConvState::GeneratingProfile, Event::ProfileReplied { reply }) => {
            Ok(apply_profile_reply(context, reply))
        }

        (ConvState::GeneratingProfile, Event::ProfileFailed { error }) => {
            let (text, placeholder) = match &error {
                RemoteError::Http { status, message } => (
                    message
                        .clone()
                        .unwrap_or_else(|| strings::profile_http_failed(*status)),
                    strings::PROFILE_HTTP_PLACEHOLDER,
                ),
                RemoteError::Transport { message } => (
                    strings::profile_transport_failed(message),
                    strings::PROFILE_TRANSPORT_PLACEHOLDER,
                ),
            };
            Ok(TransitionResult::new(ConvState::AwaitingText)
                .with_effect(Effect::bot_message(text))
                .with_effect(Effect::text_entry(placeholder))
                .with_effect(Effect::enable()))
        }

        // ============================================================
        // Everything else
        // ============================================================
        (state, _) if state.is_finished() => Err(TransitionError::Finished),

        (state, event) => Err(TransitionError::InvalidTransition(format!(
            "{} in state {}",
            event.name(),
            state.name()
        ))),
    }
}

fn send_chat(text: &str) -> TransitionResult {
    TransitionResult::new(ConvState::Sending)
        .with_effect(Effect::user_message(text))
        .with_effect(Effect::disable())
        .with_effect(Effect::SendMessage {
            text: text.to_string(),
        })
}

fn apply_chat_reply(reply: &ChatReply) -> TransitionResult {
    let mut effects: Vec<Effect> = reply.bot_text().map(Effect::bot_message).into_iter().collect();

    if reply.session_restarted {
        effects.extend(reply.notice().map(Effect::bot_message));
        effects.push(Effect::text_entry(strings::SESSION_RESTARTED_PLACEHOLDER));
        effects.push(Effect::enable());
        TransitionResult::new(ConvState::AwaitingText).with_effects(effects)
    } else if reply.end_of_quiz_phase_reached {
        effects.push(Effect::ShowConfirmation {
            affirm: strings::AFFIRM_LABEL.to_string(),
            defer: strings::DEFER_LABEL.to_string(),
        });
        effects.push(Effect::enable());
        TransitionResult::new(ConvState::AwaitingConfirmation).with_effects(effects)
    } else {
        effects.push(Effect::text_entry(strings::DEFAULT_PLACEHOLDER));
        effects.push(Effect::enable());
        TransitionResult::new(ConvState::AwaitingText).with_effects(effects)
    }
}

fn apply_profile_reply(context: &ConvContext, reply: ProfileReply) -> TransitionResult {
    if reply.complete {
        let message = reply
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| strings::PROFILE_READY_FALLBACK.to_string());
        TransitionResult::new(ConvState::Terminal)
            .with_effect(Effect::bot_message(message))
            .with_effect(Effect::ScheduleNavigation {
                destination: context.report_destination.clone(),
                delay: context.navigation_delay,
            })
    } else {
        let error = reply
            .error
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| strings::PROFILE_INCOMPLETE_FALLBACK.to_string());
        TransitionResult::new(ConvState::AwaitingText)
            .with_effect(Effect::bot_message(error))
            .with_effect(Effect::text_entry(strings::PROFILE_INCOMPLETE_PLACEHOLDER))
            .with_effect(Effect::enable())
    }
}
