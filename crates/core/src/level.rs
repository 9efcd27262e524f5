//! Level module - line-based leveling and the gravity curve
//!
//! The only progression rule is the line count: every `LINES_PER_LEVEL` lines raise
//! the level by one, and each level shortens the gravity interval by a fixed step
//! until it reaches the floor.

use crate::types::{
    BASE_GRAVITY_MS, GRAVITY_DECREMENT_PER_LEVEL_MS, GRAVITY_FLOOR_MS, LINES_PER_LEVEL,
};

/// Level for a cumulative line count. Starts at 1.
///
/// ```
/// use tetromino_core::level_for_lines;
///
/// assert_eq!(level_for_lines(0), 1);
/// assert_eq!(level_for_lines(9), 1);
/// assert_eq!(level_for_lines(10), 2);
/// ```
pub fn level_for_lines(lines: u32) -> u32 {
    lines / LINES_PER_LEVEL + 1
}

/// Gravity interval as a function of level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GravityCurve {
    pub base_ms: u32,
    pub decrement_per_level_ms: u32,
    pub floor_ms: u32,
}

impl Default for GravityCurve {
    fn default() -> Self {
        Self {
            base_ms: BASE_GRAVITY_MS,
            decrement_per_level_ms: GRAVITY_DECREMENT_PER_LEVEL_MS,
            floor_ms: GRAVITY_FLOOR_MS,
        }
    }
}

impl GravityCurve {
    /// `base - level * decrement`, never below the floor
    pub fn interval_ms(&self, level: u32) -> u32 {
        self.base_ms
            .saturating_sub(level.saturating_mul(self.decrement_per_level_ms))
            .max(self.floor_ms)
    }

    /// First level at which the floor is reached
    pub fn floor_level(&self) -> u32 {
        if self.decrement_per_level_ms == 0 {
            return u32::MAX;
        }
        let span = self.base_ms.saturating_sub(self.floor_ms);
        span.div_ceil(self.decrement_per_level_ms)
    }
}
