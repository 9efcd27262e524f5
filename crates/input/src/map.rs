//! Key bindings from terminal keys to distractor actions.

use crate::types::DistractorAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// The set of keys bound to each action. Letters match either case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    pub move_left: Vec<KeyCode>,
    pub move_right: Vec<KeyCode>,
    pub soft_drop: Vec<KeyCode>,
    pub hard_drop: Vec<KeyCode>,
    pub rotate_cw: Vec<KeyCode>,
    pub rotate_ccw: Vec<KeyCode>,
    pub quit: Vec<KeyCode>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_left: vec![KeyCode::Left, KeyCode::Char('a')],
            move_right: vec![KeyCode::Right, KeyCode::Char('d')],
            soft_drop: vec![KeyCode::Down, KeyCode::Char('s')],
            hard_drop: vec![KeyCode::Char(' ')],
            rotate_cw: vec![KeyCode::Up, KeyCode::Char('w')],
            rotate_ccw: vec![KeyCode::Char('q')],
            quit: vec![KeyCode::Esc],
        }
    }
}

fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

fn bound(keys: &[KeyCode], code: KeyCode) -> bool {
    let code = normalize(code);
    keys.iter().any(|&k| normalize(k) == code)
}

impl KeyBindings {
    /// The action a key controls, if any. Quit keys are not actions.
    pub fn action_for(&self, code: KeyCode) -> Option<DistractorAction> {
        let table = [
            (&self.move_left, DistractorAction::MoveLeft),
            (&self.move_right, DistractorAction::MoveRight),
            (&self.soft_drop, DistractorAction::SoftDrop),
            (&self.hard_drop, DistractorAction::HardDrop),
            (&self.rotate_cw, DistractorAction::RotateCw),
            (&self.rotate_ccw, DistractorAction::RotateCcw),
        ];
        table
            .into_iter()
            .find(|(keys, _)| bound(keys, code))
            .map(|(_, action)| action)
    }

    /// A bound quit key, or Ctrl-C since raw mode swallows SIGINT.
    pub fn is_quit(&self, key: KeyEvent) -> bool {
        bound(&self.quit, key.code)
            || (normalize(key.code) == KeyCode::Char('c')
                && key.modifiers.contains(KeyModifiers::CONTROL))
    }
}
