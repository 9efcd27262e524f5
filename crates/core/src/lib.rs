//! Core game rules - pure, deterministic, and testable
//!
//! This crate contains the falling-block rules used by the distractor task.
//! It has **zero dependencies** on timing, rendering, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical piece sequences
//! - **Testable**: Board and piece rules are plain values and functions
//! - **Portable**: Usable by any front end (terminal, headless, replay)
//!
//! # Module Structure
//!
//! - [`shapes`]: the static catalog of 5x5 orientation templates
//! - [`board`]: fixed-size grid with occupancy queries and line removal
//! - [`piece`]: a falling shape with legality checks, moves and rotation
//! - [`rng`]: injectable random source plus a seeded LCG
//! - [`level`]: level from line count and the gravity curve
//!
//! # Rules
//!
//! This is a deliberately minimal variant:
//!
//! - **Uniform randomness**: kind, orientation and color are each picked uniformly
//! - **Simple rotation**: try the next orientation in place, revert if it collides
//! - **No hold, no ghost, no lock delay**: a piece lands when it cannot move down
//! - **Leveling**: `lines / 10 + 1`
//!
//! # Example
//!
//! ```
//! use tetromino_core::{Board, Piece, SimpleRng};
//! use tetromino_core::types::{ColorIndex, ShapeKind};
//!
//! let mut board = Board::new(10, 20).unwrap();
//! let mut piece = Piece::new(ShapeKind::O, 0, ColorIndex::Green, board.columns());
//!
//! piece.move_to_bottom(&board);
//! assert!(!piece.legal_down(&board));
//!
//! piece.add_to_board(&mut board);
//! assert_eq!(board.filled_count(), 4);
//!
//! let mut rng = SimpleRng::new(7);
//! let next = Piece::random(&mut rng, board.columns());
//! assert!(next.is_valid_position(&board, 0, 0));
//! ```

pub mod board;
pub mod level;
pub mod piece;
pub mod rng;
pub mod shapes;

pub use tetromino_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, BoardError};
pub use level::{level_for_lines, GravityCurve};
pub use piece::Piece;
pub use rng::{RandomSource, SimpleRng};
pub use shapes::{get_shape, orientation_count, template, Template};
