//! Session engine - the time-bounded distractor loop
//!
//! This crate wraps the pure rules in `tetromino-core` with time: a clock, frame
//! pacing, held-key auto-repeat, level-driven gravity and the session deadline.
//! Input, rendering and audio are reached only through the traits in [`backend`],
//! so the same loop runs against a terminal, a test harness or a replay.
//!
//! # Timing
//!
//! Every interval is measured against a [`Clock`]. Comparisons are strict: an
//! action fires only once *more than* its interval has elapsed.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use tetromino_engine::{Session, SessionConfig, SessionPhase};
//! use tetromino_engine::core::SimpleRng;
//!
//! let config = SessionConfig::new(Duration::from_secs(1));
//! let mut session = Session::new(&config, SimpleRng::new(3), Duration::ZERO).unwrap();
//!
//! assert_eq!(session.step(Duration::from_millis(16), &[]), SessionPhase::Playing);
//! assert_eq!(session.step(Duration::from_secs(1), &[]), SessionPhase::Finished);
//! assert_eq!(session.outcome().losses, 0);
//! ```

pub mod backend;
pub mod clock;
pub mod config;
pub mod error;
pub mod report;
pub mod session;

pub use tetromino_core as core;
pub use tetromino_types as types;

pub use backend::{
    BackgroundAudio, Frame, InputBatch, InputEvent, InputSource, RenderTarget,
    MAX_EVENTS_PER_FRAME,
};
pub use clock::{Clock, FrameLimiter, ManualClock, MonotonicClock};
pub use config::{duration_from_secs, SessionConfig, TimingConfig};
pub use error::{ConfigError, SessionError, SessionResult};
pub use report::ResultsRecord;
pub use session::{run_session, Session, SessionHost, SessionOutcome, SessionPhase};
