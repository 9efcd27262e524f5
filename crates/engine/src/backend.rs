//! Backend capabilities the session loop is driven through
//!
//! The loop never touches a terminal, window or sound device directly. Hosts pass
//! an [`InputSource`], a [`RenderTarget`] and optionally a [`BackgroundAudio`].

use std::time::Duration;

use arrayvec::ArrayVec;

use crate::core::{Board, Piece};
use crate::types::DistractorAction;

/// A discrete input event, already mapped through the key bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Key for `action` went down
    Pressed(DistractorAction),
    /// Key for `action` came up
    Released(DistractorAction),
    /// Quit key or window-close signal
    Quit,
}

/// Maximum number of events handled per loop iteration. Sources drop the excess.
pub const MAX_EVENTS_PER_FRAME: usize = 32;

/// Events drained in one iteration
pub type InputBatch = ArrayVec<InputEvent, MAX_EVENTS_PER_FRAME>;

/// Source of discrete key-down/key-up events
pub trait InputSource {
    /// Append every pending event to `out` without blocking.
    fn poll(&mut self, now: Duration, out: &mut InputBatch) -> anyhow::Result<()>;
}

/// Read-only view of one frame's worth of session state
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub board: &'a Board,
    /// Active piece, absent between landing and the next spawn
    pub falling: Option<&'a Piece>,
    /// Preview of the upcoming piece
    pub next: &'a Piece,
    pub level: u32,
    pub lines_cleared: u32,
    pub losses: u32,
    /// Time left until the deadline
    pub remaining: Duration,
}

/// Draws frames. Called once per loop iteration.
pub trait RenderTarget {
    fn present(&mut self, frame: &Frame<'_>) -> anyhow::Result<()>;
}

/// Looping background audio for the length of a session
pub trait BackgroundAudio {
    fn play_looped(&mut self) -> anyhow::Result<()>;

    /// Called on every exit path, including aborts and backend failures
    fn stop(&mut self);
}
