//! Session configuration and fail-fast validation

use std::time::Duration;

use crate::core::{Board, GravityCurve};
use crate::error::ConfigError;
use crate::types::{
    DEFAULT_COLUMNS, DEFAULT_FRAME_RATE, DEFAULT_ROWS, SIDEWAYS_REPEAT_MS, SOFT_DROP_REPEAT_MS,
};

/// Gravity and auto-repeat timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingConfig {
    /// Level-driven gravity
    pub gravity: GravityCurve,
    /// When set, gravity ignores the level and always uses this interval
    pub fixed_gravity: Option<Duration>,
    pub sideways_repeat: Duration,
    pub soft_drop_repeat: Duration,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            gravity: GravityCurve::default(),
            fixed_gravity: None,
            sideways_repeat: Duration::from_millis(SIDEWAYS_REPEAT_MS as u64),
            soft_drop_repeat: Duration::from_millis(SOFT_DROP_REPEAT_MS as u64),
        }
    }
}

impl TimingConfig {
    /// Time between automatic one-row drops at `level`
    pub fn gravity_interval(&self, level: u32) -> Duration {
        self.fixed_gravity
            .unwrap_or_else(|| Duration::from_millis(self.gravity.interval_ms(level) as u64))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sideways_repeat.is_zero() {
            return Err(ConfigError::ZeroInterval { name: "sideways repeat" });
        }
        if self.soft_drop_repeat.is_zero() {
            return Err(ConfigError::ZeroInterval { name: "soft drop repeat" });
        }
        if self.gravity.floor_ms == 0 {
            return Err(ConfigError::ZeroInterval { name: "gravity floor" });
        }
        if self.fixed_gravity.is_some_and(|d| d.is_zero()) {
            return Err(ConfigError::ZeroInterval { name: "fixed gravity" });
        }
        Ok(())
    }
}

/// Everything the host decides before a session starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Wall-clock length of the session
    pub duration: Duration,
    pub columns: u16,
    pub rows: u16,
    /// Upper bound on loop iterations per second
    pub frame_rate: u32,
    pub timing: TimingConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(60),
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            frame_rate: DEFAULT_FRAME_RATE,
            timing: TimingConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Default board and timing with the given duration
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            ..Self::default()
        }
    }

    pub fn with_board(mut self, columns: u16, rows: u16) -> Self {
        self.columns = columns;
        self.rows = rows;
        self
    }

    pub fn with_frame_rate(mut self, frame_rate: u32) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    /// Check every constraint. Builds (and discards) a board to reuse its bounds check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_rate == 0 {
            return Err(ConfigError::FrameRate);
        }
        Board::new(self.columns, self.rows)?;
        self.timing.validate()
    }

    /// Minimum time between two loop iterations
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate.max(1)
    }
}

/// Parse a duration given in (fractional) seconds
pub fn duration_from_secs(secs: f64) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f64(secs).map_err(|e| ConfigError::Duration(format!("{secs}: {e}")))
}
