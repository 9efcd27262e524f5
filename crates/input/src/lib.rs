//! Terminal input for the distractor session.
//!
//! Maps `crossterm` key events into [`types::DistractorAction`]s and feeds them to
//! the session as discrete key-down/key-up events, including on terminals that
//! never report key releases.

pub mod handler;
pub mod map;

pub use tetromino_types as types;

pub use handler::{KeyTracker, TerminalInput};
pub use map::KeyBindings;
