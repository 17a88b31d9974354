//! Trait abstractions for runtime I/O
//!
//! These traits keep rendering out of the state machine and let the
//! executor run against recording doubles in tests.

use crate::state_machine::Message;
use std::sync::Arc;

/// Append-only log of conversation turns
pub trait Transcript: Send + Sync {
    /// Add a turn at the end and bring it into view
    fn append(&self, message: Message);
}

/// The single input region under the transcript.
///
/// Each `show_*` call replaces whatever was mounted. Mounting keeps the
/// current enabled flag; the controller enables explicitly once the next
/// control is in place.
pub trait InputSurface: Send + Sync {
    fn show_text_entry(&self, placeholder: &str);

    /// Mount the two-choice gate. Activations come back as
    /// `Event::Affirm` / `Event::Defer` on the runtime channel.
    fn show_confirmation(&self, affirm: &str, defer: &str);

    fn show_busy(&self, status: &str);

    /// Toggle every interactive element of the mounted control at once
    fn set_enabled(&self, enabled: bool);
}

/// Leaves the conversation for another destination
pub trait Navigator: Send + Sync {
    fn navigate(&self, destination: &str) -> Result<(), String>;
}

/// Combined view trait for convenience
pub trait ChatView: Transcript + InputSurface {}
impl<T: Transcript + InputSurface> ChatView for T {}

// ============================================================================
// Arc implementations for trait objects
// ============================================================================

impl<T: Transcript + ?Sized> Transcript for Arc<T> {
    fn append(&self, message: Message) {
        (**self).append(message);
    }
}

impl<T: InputSurface + ?Sized> InputSurface for Arc<T> {
    fn show_text_entry(&self, placeholder: &str) {
        (**self).show_text_entry(placeholder);
    }

    fn show_confirmation(&self, affirm: &str, defer: &str) {
        (**self).show_confirmation(affirm, defer);
    }

    fn show_busy(&self, status: &str) {
        (**self).show_busy(status);
    }

    fn set_enabled(&self, enabled: bool) {
        (**self).set_enabled(enabled);
    }
}

impl<T: Navigator + ?Sized> Navigator for Arc<T> {
    fn navigate(&self, destination: &str) -> Result<(), String> {
        (**self).navigate(destination)
    }
}
