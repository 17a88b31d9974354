//! Property-based tests for the state machine
//!
//! These tests drive random event sequences through `transition` and check
//! the invariants the input surface relies on.

use super::transition::*;
use super::*;
use crate::transport::{ChatReply, ProfileReply, RemoteError};
use proptest::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

fn test_context() -> ConvContext {
    ConvContext::new("http://test/report")
}

/// What the input surface would show after applying effects
#[derive(Debug, Clone, PartialEq, Eq)]
enum Mounted {
    Nothing,
    TextEntry,
    Confirmation,
    Busy,
}

#[derive(Debug, Clone)]
struct SurfaceModel {
    mounted: Mounted,
    enabled: bool,
    calls_in_flight: u32,
}

impl SurfaceModel {
    fn new() -> Self {
        Self {
            mounted: Mounted::Nothing,
            enabled: true,
            calls_in_flight: 0,
        }
    }

    fn apply(&mut self, effect: &Effect) {
        match effect {
            Effect::ShowTextEntry { .. } => self.mounted = Mounted::TextEntry,
            Effect::ShowConfirmation { .. } => self.mounted = Mounted::Confirmation,
            Effect::ShowBusy { .. } => self.mounted = Mounted::Busy,
            Effect::SetEnabled { enabled } => self.enabled = *enabled,
            Effect::StartSession | Effect::SendMessage { .. } | Effect::RequestProfile => {
                self.calls_in_flight += 1;
            }
            Effect::AppendMessage { .. } | Effect::ScheduleNavigation { .. } => {}
        }
    }
}

fn is_backend_result(event: &Event) -> bool {
    matches!(
        event,
        Event::SessionStarted { .. }
            | Event::SessionStartFailed { .. }
            | Event::ChatReplied { .. }
            | Event::ChatFailed { .. }
            | Event::ProfileReplied { .. }
            | Event::ProfileFailed { .. }
    )
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_remote_error() -> impl Strategy<Value = RemoteError> {
    prop_oneof![
        "[a-zA-Z ]{1,30}".prop_map(RemoteError::transport),
        (400u16..600, proptest::option::of("[a-zA-Z ]{1,30}"))
            .prop_map(|(status, message)| RemoteError::http(status, message)),
    ]
}

fn arb_chat_reply() -> impl Strategy<Value = ChatReply> {
    (
        proptest::option::of("[a-zA-Z?! ]{0,40}"),
        any::<bool>(),
        any::<bool>(),
        proptest::option::of("[a-zA-Z ]{0,20}"),
    )
        .prop_map(
            |(bot_response, session_restarted, end_of_quiz_phase_reached, restart_notice)| {
                ChatReply {
                    bot_response,
                    session_restarted,
                    end_of_quiz_phase_reached,
                    restart_notice,
                }
            },
        )
}

fn arb_profile_reply() -> impl Strategy<Value = ProfileReply> {
    (
        any::<bool>(),
        proptest::option::of("[a-zA-Z ]{0,30}"),
        proptest::option::of("[a-zA-Z ]{0,30}"),
    )
        .prop_map(|(complete, message, error)| ProfileReply {
            complete,
            message,
            error,
        })
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        Just(Event::Launch),
        "[a-zA-Z ]{0,20}".prop_map(|text| Event::UserSubmit { text }),
        Just(Event::Affirm),
        Just(Event::Defer),
        "[a-zA-Z ]{1,20}".prop_map(|initial_message| Event::SessionStarted { initial_message }),
        arb_remote_error().prop_map(|error| Event::SessionStartFailed { error }),
        arb_chat_reply().prop_map(|reply| Event::ChatReplied { reply }),
        arb_remote_error().prop_map(|error| Event::ChatFailed { error }),
        arb_profile_reply().prop_map(|reply| Event::ProfileReplied { reply }),
        arb_remote_error().prop_map(|error| Event::ProfileFailed { error }),
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    /// Surface and state stay consistent over any event sequence
    #[test]
    fn prop_surface_tracks_state(events in proptest::collection::vec(arb_event(), 1..60)) {
        let ctx = test_context();
        let mut state = ConvState::Idle;
        let mut surface = SurfaceModel::new();

        for event in events {
            let was_in_flight = state.is_in_flight();
            let backend_result = is_backend_result(&event);

            let Ok(result) = transition(&state, &ctx, event) else {
                continue;
            };

            // A backend result is only accepted for the call that is outstanding
            if backend_result {
                prop_assert!(was_in_flight);
                surface.calls_in_flight -= 1;
            }

            // Every call is preceded by a disable in the same batch
            if let Some(call_idx) = result.effects.iter().position(Effect::is_remote_call) {
                prop_assert!(!was_in_flight, "call issued while another was in flight");
                let disable_idx = result.effects.iter().position(|e| *e == Effect::disable());
                prop_assert!(matches!(disable_idx, Some(i) if i < call_idx));
            }

            for effect in &result.effects {
                surface.apply(effect);
            }
            state = result.new_state;

            prop_assert!(surface.calls_in_flight <= 1);
            prop_assert_eq!(surface.calls_in_flight == 1, state.is_in_flight());

            match state {
                ConvState::AwaitingText => {
                    prop_assert_eq!(&surface.mounted, &Mounted::TextEntry);
                    prop_assert!(surface.enabled);
                }
                ConvState::AwaitingConfirmation => {
                    prop_assert!(state.pending_confirmation());
                    prop_assert_eq!(&surface.mounted, &Mounted::Confirmation);
                    prop_assert!(surface.enabled);
                }
                ConvState::Starting
                | ConvState::Sending
                | ConvState::GeneratingProfile
                | ConvState::StartFailed => {
                    prop_assert!(!surface.enabled, "surface enabled in {}", state.name());
                    prop_assert!(!state.pending_confirmation());
                }
                ConvState::Idle | ConvState::Terminal => {
                    prop_assert!(!state.pending_confirmation());
                }
            }
        }
    }

    /// Any run of plain replies keeps the conversation in free-text mode
    #[test]
    fn prop_plain_replies_stay_in_text_mode(
        turns in proptest::collection::vec(("[a-zA-Z]{1,10}", "[a-zA-Z ]{0,30}"), 1..20)
    ) {
        let ctx = test_context();
        let mut state = ConvState::AwaitingText;

        for (text, answer) in turns {
            state = transition(&state, &ctx, Event::UserSubmit { text }).unwrap().new_state;
            prop_assert_eq!(state, ConvState::Sending);

            let result = transition(&state, &ctx, Event::ChatReplied {
                reply: ChatReply::text(answer),
            }).unwrap();
            prop_assert!(result.effects.last() == Some(&Effect::enable()));
            state = result.new_state;
            prop_assert_eq!(state, ConvState::AwaitingText);
        }
    }

    /// Failures always hand control back, except at session start
    #[test]
    fn prop_failures_return_control(error in arb_remote_error()) {
        let ctx = test_context();

        for (state, event) in [
            (ConvState::Sending, Event::ChatFailed { error: error.clone() }),
            (ConvState::GeneratingProfile, Event::ProfileFailed { error: error.clone() }),
        ] {
            let result = transition(&state, &ctx, event).unwrap();
            prop_assert_eq!(result.new_state, ConvState::AwaitingText);
            prop_assert!(
                matches!(result.effects.first(), Some(Effect::AppendMessage { message }) if message.sender == Sender::Bot),
                "first effect must be a bot message"
            );
            prop_assert!(result.effects.last() == Some(&Effect::enable()));
        }

        let result = transition(&ConvState::Starting, &ctx, Event::SessionStartFailed { error }).unwrap();
        prop_assert_eq!(result.new_state, ConvState::StartFailed);
        prop_assert!(!result.effects.contains(&Effect::enable()));
    }

    /// Rejected user input never produces a call
    #[test]
    fn prop_blank_input_rejected(text in "[ \t\n]{0,10}") {
        let ctx = test_context();
        for state in [ConvState::AwaitingText, ConvState::AwaitingConfirmation] {
            prop_assert_eq!(
                transition(&state, &ctx, Event::UserSubmit { text: text.clone() }).unwrap_err(),
                TransitionError::EmptyMessage
            );
        }
    }
}
