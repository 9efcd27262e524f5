//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the distractor.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core rules, session loop, terminal rendering).
//!
//! # Board Dimensions
//!
//! The default playfield is the classic 10 columns by 20 rows. Any size from
//! `MIN_BOARD_DIM` to `MAX_BOARD_DIM` (inclusive) is accepted per axis.
//!
//! - **Columns**: indexed 0..columns (left to right)
//! - **Rows**: indexed 0..rows (top to bottom)
//! - **Spawn**: `x = columns / 2 - TEMPLATE_SIZE / 2`, `y = SPAWN_Y` (above the board)
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_GRAVITY_MS` | 350 | Gravity interval before the level decrement |
//! | `GRAVITY_DECREMENT_PER_LEVEL_MS` | 10 | Subtracted once per level |
//! | `GRAVITY_FLOOR_MS` | 50 | Gravity never gets faster than this |
//! | `SIDEWAYS_REPEAT_MS` | 150 | Repeat interval while left/right is held |
//! | `SOFT_DROP_REPEAT_MS` | 100 | Repeat interval while down is held |
//!
//! # Examples
//!
//! ```
//! use tetromino_types::{ColorIndex, DistractorAction, ShapeKind, DEFAULT_COLUMNS, DEFAULT_ROWS};
//!
//! let kind = ShapeKind::from_str("t").unwrap();
//! assert_eq!(kind, ShapeKind::T);
//!
//! assert_eq!(ColorIndex::from_index(2), Some(ColorIndex::Red));
//! assert_eq!(DistractorAction::from_str("hardDrop"), Some(DistractorAction::HardDrop));
//!
//! assert_eq!(DEFAULT_COLUMNS, 10);
//! assert_eq!(DEFAULT_ROWS, 20);
//! ```

/// Default board width in cells (10 columns)
pub const DEFAULT_COLUMNS: u16 = 10;

/// Default board height in cells (20 rows)
pub const DEFAULT_ROWS: u16 = 20;

/// Smallest accepted board dimension (per axis)
pub const MIN_BOARD_DIM: u16 = 5;

/// Largest accepted board dimension (per axis)
pub const MAX_BOARD_DIM: u16 = 64;

/// Side length of every shape template grid
pub const TEMPLATE_SIZE: usize = 5;

/// Row at which new pieces start (two rows above the visible board)
pub const SPAWN_Y: i16 = -2;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Gravity interval before any level decrement is applied
pub const BASE_GRAVITY_MS: u32 = 350;

/// Gravity speed-up per level
pub const GRAVITY_DECREMENT_PER_LEVEL_MS: u32 = 10;

/// Fastest gravity interval, regardless of level
pub const GRAVITY_FLOOR_MS: u32 = 50;

/// Auto-repeat interval while a sideways key is held
pub const SIDEWAYS_REPEAT_MS: u32 = 150;

/// Auto-repeat interval while the soft-drop key is held
pub const SOFT_DROP_REPEAT_MS: u32 = 100;

/// Default frame-rate cap for the session loop
pub const DEFAULT_FRAME_RATE: u32 = 30;

/// Number of distinct piece colors
pub const COLOR_COUNT: u8 = 4;

/// The seven piece kinds
///
/// Each kind owns an ordered list of orientation templates in the shape catalog:
/// - **S**, **Z**, **I**: two orientations
/// - **O**: one orientation
/// - **J**, **L**, **T**: four orientations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    S,
    Z,
    J,
    L,
    I,
    O,
    T,
}

impl ShapeKind {
    /// Every kind, in catalog order. Used for uniform random choice.
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::J,
        ShapeKind::L,
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
    ];

    /// Parse shape kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetromino_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("i"), Some(ShapeKind::I));
    /// assert_eq!(ShapeKind::from_str("O"), Some(ShapeKind::O));
    /// assert_eq!(ShapeKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "s" => Some(ShapeKind::S),
            "z" => Some(ShapeKind::Z),
            "j" => Some(ShapeKind::J),
            "l" => Some(ShapeKind::L),
            "i" => Some(ShapeKind::I),
            "o" => Some(ShapeKind::O),
            "t" => Some(ShapeKind::T),
            _ => None,
        }
    }

    /// Convert to uppercase letter
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::S => "S",
            ShapeKind::Z => "Z",
            ShapeKind::J => "J",
            ShapeKind::L => "L",
            ShapeKind::I => "I",
            ShapeKind::O => "O",
            ShapeKind::T => "T",
        }
    }
}

/// Color of a landed box or a piece.
///
/// The discriminant is the color index (0..=3) used throughout the board model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ColorIndex {
    Blue = 0,
    Green = 1,
    Red = 2,
    Yellow = 3,
}

impl ColorIndex {
    pub const ALL: [ColorIndex; COLOR_COUNT as usize] = [
        ColorIndex::Blue,
        ColorIndex::Green,
        ColorIndex::Red,
        ColorIndex::Yellow,
    ];

    /// Look up a color by index. Returns `None` for indices >= `COLOR_COUNT`.
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn index(self) -> u8 {
        self as u8
    }
}

/// A cell on the game board
///
/// - `None`: blank
/// - `Some(ColorIndex)`: occupied by a landed box of that color
pub type Cell = Option<ColorIndex>;

/// Player actions that drive the falling piece
///
/// Quitting is not an action: it is reported separately by input backends
/// because it unwinds the whole host session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DistractorAction {
    /// Move piece one cell left (repeats while held)
    MoveLeft,
    /// Move piece one cell right (repeats while held)
    MoveRight,
    /// Move piece one cell down (repeats while held)
    SoftDrop,
    /// Drop piece to the lowest legal row
    HardDrop,
    /// Advance to the next orientation
    RotateCw,
    /// Go back to the previous orientation
    RotateCcw,
}

impl DistractorAction {
    pub const ALL: [DistractorAction; 6] = [
        DistractorAction::MoveLeft,
        DistractorAction::MoveRight,
        DistractorAction::SoftDrop,
        DistractorAction::HardDrop,
        DistractorAction::RotateCw,
        DistractorAction::RotateCcw,
    ];

    /// Parse action from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetromino_types::DistractorAction;
    ///
    /// assert_eq!(DistractorAction::from_str("moveLeft"), Some(DistractorAction::MoveLeft));
    /// assert_eq!(DistractorAction::from_str("rotateccw"), Some(DistractorAction::RotateCcw));
    /// assert_eq!(DistractorAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(DistractorAction::MoveLeft),
            "moveright" => Some(DistractorAction::MoveRight),
            "softdrop" => Some(DistractorAction::SoftDrop),
            "harddrop" => Some(DistractorAction::HardDrop),
            "rotatecw" => Some(DistractorAction::RotateCw),
            "rotateccw" => Some(DistractorAction::RotateCcw),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            DistractorAction::MoveLeft => "moveLeft",
            DistractorAction::MoveRight => "moveRight",
            DistractorAction::SoftDrop => "softDrop",
            DistractorAction::HardDrop => "hardDrop",
            DistractorAction::RotateCw => "rotateCw",
            DistractorAction::RotateCcw => "rotateCcw",
        }
    }

    /// Whether releasing this action's key ends an auto-repeat.
    pub fn repeats_while_held(&self) -> bool {
        matches!(
            self,
            DistractorAction::MoveLeft | DistractorAction::MoveRight | DistractorAction::SoftDrop
        )
    }
}
