//! Runtime for executing the conversation
//!
//! Connects the pure state machine to the transport and the view.

mod executor;
pub mod traits;


pub use executor::ConversationRuntime;
pub use traits::*;
