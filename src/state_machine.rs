//! Core conversation state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions.
//! The runtime feeds events in and executes the returned effects; nothing
//! here touches the network or the terminal.

mod effect;
pub mod event;
pub mod state;
pub mod strings;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use state::{ConvContext, ConvState, Message, Sender};
pub use transition::transition;
