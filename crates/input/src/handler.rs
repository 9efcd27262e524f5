//! Held-key tracking and the crossterm-backed input source.
//!
//! The session wants discrete key-down/key-up events. Terminals only report key
//! releases when the keyboard enhancement protocol is active; elsewhere a movement
//! key counts as released once no press for it has arrived within a timeout.

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyEvent, KeyEventKind, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::{execute, terminal};
use tracing::debug;

use tetromino_engine::{InputBatch, InputEvent, InputSource};

use crate::map::KeyBindings;
use crate::types::DistractorAction;

// Terminal auto-repeat re-sends presses faster than this while a key is down.
const DEFAULT_KEY_RELEASE_TIMEOUT: Duration = Duration::from_millis(150);

const HELD_COUNT: usize = 3;

const HELD_ACTIONS: [DistractorAction; HELD_COUNT] = [
    DistractorAction::MoveLeft,
    DistractorAction::MoveRight,
    DistractorAction::SoftDrop,
];

fn held_slot(action: DistractorAction) -> Option<usize> {
    HELD_ACTIONS.iter().position(|&a| a == action)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hold {
    Up,
    /// Down, with the last time a press was seen
    Down(Duration),
    /// Key is up but the `Released` did not fit in a batch yet
    Releasing,
}

/// Turns raw presses and releases into one `Pressed` per hold and one `Released`.
///
/// Events that do not fit in a full batch are either dropped before any state
/// changes (presses) or kept pending and emitted on a later poll (releases, quit),
/// so the session never sees a hold without its release.
#[derive(Debug, Clone)]
pub struct KeyTracker {
    held: [Hold; HELD_COUNT],
    quit_pending: bool,
    /// `None` when the terminal reports real releases
    release_timeout: Option<Duration>,
    bindings: KeyBindings,
}

impl KeyTracker {
    /// Tracker for a terminal that reports key releases
    pub fn with_release_events() -> Self {
        Self {
            held: [Hold::Up; HELD_COUNT],
            quit_pending: false,
            release_timeout: None,
            bindings: KeyBindings::default(),
        }
    }

    /// Tracker that synthesizes releases after `timeout` without a press
    pub fn with_release_timeout(timeout: Duration) -> Self {
        Self {
            held: [Hold::Up; HELD_COUNT],
            quit_pending: false,
            release_timeout: Some(timeout),
            bindings: KeyBindings::default(),
        }
    }

    pub fn with_bindings(mut self, bindings: KeyBindings) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn is_held(&self, action: DistractorAction) -> bool {
        held_slot(action).is_some_and(|slot| matches!(self.held[slot], Hold::Down(_)))
    }

    /// True while a release or quit is waiting for room in a batch
    pub fn has_pending(&self) -> bool {
        self.quit_pending || self.held.contains(&Hold::Releasing)
    }

    pub fn press(&mut self, action: DistractorAction, now: Duration, out: &mut InputBatch) {
        let Some(slot) = held_slot(action) else {
            let _ = out.try_push(InputEvent::Pressed(action));
            return;
        };
        match self.held[slot] {
            // The session still holds it; no new `Pressed`.
            Hold::Down(_) | Hold::Releasing => self.held[slot] = Hold::Down(now),
            Hold::Up => {
                if out.try_push(InputEvent::Pressed(action)).is_ok() {
                    self.held[slot] = Hold::Down(now);
                }
            }
        }
    }

    pub fn release(&mut self, action: DistractorAction, out: &mut InputBatch) {
        if let Some(slot) = held_slot(action) {
            if self.held[slot] != Hold::Up {
                self.emit_release(slot, out);
            }
        }
    }

    pub fn quit(&mut self, out: &mut InputBatch) {
        self.quit_pending = out.try_push(InputEvent::Quit).is_err();
    }

    /// Emit releases and quit requests that an earlier full batch held back
    pub fn flush_pending(&mut self, out: &mut InputBatch) {
        if self.quit_pending {
            self.quit(out);
        }
        for slot in 0..HELD_COUNT {
            if self.held[slot] == Hold::Releasing {
                self.emit_release(slot, out);
            }
        }
    }

    /// Release every held action whose last press is older than the timeout
    pub fn expire(&mut self, now: Duration, out: &mut InputBatch) {
        self.flush_pending(out);
        let Some(timeout) = self.release_timeout else {
            return;
        };
        for slot in 0..HELD_COUNT {
            if let Hold::Down(last) = self.held[slot] {
                if now.saturating_sub(last) > timeout {
                    self.emit_release(slot, out);
                }
            }
        }
    }

    fn emit_release(&mut self, slot: usize, out: &mut InputBatch) {
        self.held[slot] = match out.try_push(InputEvent::Released(HELD_ACTIONS[slot])) {
            Ok(()) => Hold::Up,
            Err(_) => Hold::Releasing,
        };
    }

    /// Route one key event
    pub fn handle_key(&mut self, key: KeyEvent, now: Duration, out: &mut InputBatch) {
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                if self.bindings.is_quit(key) {
                    self.quit(out);
                    return;
                }
                if let Some(action) = self.bindings.action_for(key.code) {
                    self.press(action, now, out);
                }
            }
            KeyEventKind::Release => {
                if let Some(action) = self.bindings.action_for(key.code) {
                    self.release(action, out);
                }
            }
        }
    }
}

impl Default for KeyTracker {
    fn default() -> Self {
        Self::with_release_timeout(DEFAULT_KEY_RELEASE_TIMEOUT)
    }
}

/// [`InputSource`] reading the terminal through crossterm without blocking
#[derive(Debug, Default)]
pub struct TerminalInput {
    tracker: KeyTracker,
    enhanced: bool,
}

impl TerminalInput {
    /// Ask the terminal for key release events. Falls back to the release timeout
    /// when the terminal does not support the keyboard enhancement protocol.
    pub fn enter(bindings: KeyBindings) -> Result<Self> {
        let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if enhanced {
            execute!(
                io::stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        let tracker = if enhanced {
            KeyTracker::with_release_events()
        } else {
            KeyTracker::default()
        }
        .with_bindings(bindings);
        debug!(enhanced, "keyboard input ready");
        Ok(Self { tracker, enhanced })
    }

    pub fn exit(&mut self) -> Result<()> {
        if self.enhanced {
            execute!(io::stdout(), PopKeyboardEnhancementFlags)?;
            self.enhanced = false;
        }
        Ok(())
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self, now: Duration, out: &mut InputBatch) -> Result<()> {
        self.tracker.flush_pending(out);
        // Leave whatever does not fit queued for the next frame.
        while !out.is_full() && event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                self.tracker.handle_key(key, now, out);
            }
        }
        self.tracker.expire(now, out);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_repeated_presses_emit_one_pressed() {
        let mut tracker = KeyTracker::with_release_timeout(ms(150));
        let mut out = InputBatch::new();

        tracker.handle_key(key(KeyCode::Left, KeyEventKind::Press), ms(0), &mut out);
        tracker.handle_key(key(KeyCode::Left, KeyEventKind::Press), ms(30), &mut out);
        tracker.handle_key(key(KeyCode::Left, KeyEventKind::Repeat), ms(60), &mut out);

        assert_eq!(out.as_slice(), &[InputEvent::Pressed(DistractorAction::MoveLeft)]);
        assert!(tracker.is_held(DistractorAction::MoveLeft));
    }

    #[test]
    fn test_auto_release_after_timeout_without_release_events() {
        let mut tracker = KeyTracker::with_release_timeout(ms(50));
        let mut out = InputBatch::new();

        tracker.press(DistractorAction::SoftDrop, ms(0), &mut out);
        tracker.expire(ms(50), &mut out);
        assert!(tracker.is_held(DistractorAction::SoftDrop));

        tracker.expire(ms(51), &mut out);
        assert!(!tracker.is_held(DistractorAction::SoftDrop));
        assert_eq!(
            out.as_slice(),
            &[
                InputEvent::Pressed(DistractorAction::SoftDrop),
                InputEvent::Released(DistractorAction::SoftDrop),
            ]
        );
    }

    #[test]
    fn test_repeated_press_extends_hold() {
        let mut tracker = KeyTracker::with_release_timeout(ms(50));
        let mut out = InputBatch::new();

        tracker.press(DistractorAction::MoveRight, ms(0), &mut out);
        tracker.press(DistractorAction::MoveRight, ms(40), &mut out);
        tracker.expire(ms(80), &mut out);
        assert!(tracker.is_held(DistractorAction::MoveRight));
    }

    #[test]
    fn test_real_release_events_never_expire() {
        let mut tracker = KeyTracker::with_release_events();
        let mut out = InputBatch::new();

        tracker.handle_key(key(KeyCode::Char('a'), KeyEventKind::Press), ms(0), &mut out);
        tracker.expire(ms(10_000), &mut out);
        assert!(tracker.is_held(DistractorAction::MoveLeft));

        tracker.handle_key(key(KeyCode::Char('a'), KeyEventKind::Release), ms(10_001), &mut out);
        assert_eq!(
            out.as_slice(),
            &[
                InputEvent::Pressed(DistractorAction::MoveLeft),
                InputEvent::Released(DistractorAction::MoveLeft),
            ]
        );
    }

    #[test]
    fn test_one_shot_actions_pass_through_every_press() {
        let mut tracker = KeyTracker::default();
        let mut out = InputBatch::new();

        tracker.handle_key(key(KeyCode::Up, KeyEventKind::Press), ms(0), &mut out);
        tracker.handle_key(key(KeyCode::Up, KeyEventKind::Press), ms(10), &mut out);
        tracker.handle_key(key(KeyCode::Up, KeyEventKind::Release), ms(20), &mut out);

        assert_eq!(
            out.as_slice(),
            &[
                InputEvent::Pressed(DistractorAction::RotateCw),
                InputEvent::Pressed(DistractorAction::RotateCw),
            ]
        );
    }

    #[test]
    fn test_quit_on_press() {
        let mut tracker = KeyTracker::default();
        let mut out = InputBatch::new();

        tracker.handle_key(key(KeyCode::Esc, KeyEventKind::Release), ms(0), &mut out);
        assert!(out.is_empty());

        tracker.handle_key(key(KeyCode::Esc, KeyEventKind::Press), ms(1), &mut out);
        assert_eq!(out.as_slice(), &[InputEvent::Quit]);
    }

    #[test]
    fn test_custom_bindings_drive_tracker() {
        let bindings = KeyBindings {
            move_left: vec![KeyCode::Char('j')],
            quit: vec![KeyCode::Char('x')],
            ..KeyBindings::default()
        };
        let mut tracker = KeyTracker::with_release_events().with_bindings(bindings);
        let mut out = InputBatch::new();

        tracker.handle_key(key(KeyCode::Left, KeyEventKind::Press), ms(0), &mut out);
        tracker.handle_key(key(KeyCode::Char('J'), KeyEventKind::Press), ms(1), &mut out);
        tracker.handle_key(key(KeyCode::Esc, KeyEventKind::Press), ms(2), &mut out);
        tracker.handle_key(key(KeyCode::Char('x'), KeyEventKind::Press), ms(3), &mut out);

        assert_eq!(
            out.as_slice(),
            &[InputEvent::Pressed(DistractorAction::MoveLeft), InputEvent::Quit]
        );
    }

    #[test]
    fn test_full_batch_drops_excess() {
        let mut tracker = KeyTracker::default();
        let mut out = InputBatch::new();
        for i in 0..40 {
            tracker.press(DistractorAction::HardDrop, ms(i), &mut out);
        }
        assert!(out.is_full());
    }

    fn full_batch(tracker: &mut KeyTracker, now: Duration) -> InputBatch {
        let mut out = InputBatch::new();
        while !out.is_full() {
            tracker.press(DistractorAction::RotateCw, now, &mut out);
        }
        out
    }

    #[test]
    fn test_expired_release_survives_full_batch() {
        let mut tracker = KeyTracker::with_release_timeout(ms(50));
        let mut out = InputBatch::new();
        tracker.press(DistractorAction::MoveLeft, ms(0), &mut out);

        let mut out = full_batch(&mut tracker, ms(100));
        tracker.expire(ms(100), &mut out);
        assert!(!out.contains(&InputEvent::Released(DistractorAction::MoveLeft)));
        assert!(!tracker.is_held(DistractorAction::MoveLeft));
        assert!(tracker.has_pending());

        let mut out = InputBatch::new();
        tracker.expire(ms(133), &mut out);
        assert_eq!(out.as_slice(), &[InputEvent::Released(DistractorAction::MoveLeft)]);
        assert!(!tracker.has_pending());
    }

    #[test]
    fn test_key_release_survives_full_batch() {
        let mut tracker = KeyTracker::with_release_events();
        let mut out = InputBatch::new();
        tracker.handle_key(key(KeyCode::Down, KeyEventKind::Press), ms(0), &mut out);

        let mut out = full_batch(&mut tracker, ms(10));
        tracker.handle_key(key(KeyCode::Down, KeyEventKind::Release), ms(10), &mut out);
        assert!(!out.contains(&InputEvent::Released(DistractorAction::SoftDrop)));

        let mut out = InputBatch::new();
        tracker.flush_pending(&mut out);
        assert_eq!(out.as_slice(), &[InputEvent::Released(DistractorAction::SoftDrop)]);
    }

    #[test]
    fn test_press_into_full_batch_does_not_start_hold() {
        let mut tracker = KeyTracker::with_release_timeout(ms(50));
        let mut out = full_batch(&mut tracker, ms(0));

        tracker.press(DistractorAction::MoveRight, ms(0), &mut out);
        assert!(!tracker.is_held(DistractorAction::MoveRight));

        let mut out = InputBatch::new();
        tracker.press(DistractorAction::MoveRight, ms(30), &mut out);
        assert_eq!(out.as_slice(), &[InputEvent::Pressed(DistractorAction::MoveRight)]);
        assert!(tracker.is_held(DistractorAction::MoveRight));
    }

    #[test]
    fn test_quit_survives_full_batch() {
        let mut tracker = KeyTracker::default();
        let mut out = full_batch(&mut tracker, ms(0));
        tracker.handle_key(key(KeyCode::Esc, KeyEventKind::Press), ms(0), &mut out);
        assert!(!out.contains(&InputEvent::Quit));

        let mut out = InputBatch::new();
        tracker.expire(ms(1), &mut out);
        assert_eq!(out.as_slice(), &[InputEvent::Quit]);
        assert!(!tracker.has_pending());
    }
}
