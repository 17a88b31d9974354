//! Full-screen terminal front end
//!
//! The runtime talks to the screen through [`TerminalView`] and
//! [`TerminalNavigator`]; key presses travel back as runtime events.

mod app;
mod input;
mod transcript;

pub use app::{run_terminal, ExitReason, TerminalNavigator, TerminalView};
