//! Terminal rendering for the distractor session.
//!
//! Renders into a simple framebuffer that is diffed and flushed to the terminal
//! through crossterm; there is no widget toolkit in between.
//!
//! - [`layout`] fits the board into the viewport (two terminal columns per board column)
//! - [`game_view`] draws a session frame: border, cells, falling piece, side panel
//! - [`renderer`] turns framebuffers into escape sequences
//! - [`canvas`] ties them together as the session's render target

pub mod canvas;
pub mod fb;
pub mod game_view;
pub mod layout;
pub mod renderer;

pub use tetromino_core as core;
pub use tetromino_engine as engine;
pub use tetromino_types as types;

pub use canvas::TerminalCanvas;
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, PANEL_WIDTH};
pub use layout::{fit_board_to_viewport, BoardLayout, LayoutError, Margins, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
