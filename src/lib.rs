//! Tetromino distractor (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so the binary, integration tests
//! and benchmarks use a single path: `tetromino_distractor::{core,engine,input,term,types}`.

pub use tetromino_core as core;
pub use tetromino_engine as engine;
pub use tetromino_input as input;
pub use tetromino_term as term;
pub use tetromino_types as types;
