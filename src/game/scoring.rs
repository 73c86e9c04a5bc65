//! Scoring Rules
//!
//! Points for a correct answer:
//!
//! ```text
//! points = base_points + trunc(time_left * time_bonus_scale) + streak * streak_bonus
//! ```
//!
//! where `streak` is the value *before* this answer is counted.
//! The time bonus is computed in `f32` and truncated toward zero, so
//! `7.389s -> 738`, never rounded up.

use std::str::FromStr;

use serde::{Serialize, Deserialize};

/// Base points for any correct answer.
pub const BASE_POINTS: u64 = 1000;

/// Multiplier applied to the remaining time before truncation.
pub const TIME_BONUS_SCALE: f32 = 100.0;

/// Extra points per answer already in the current streak.
pub const STREAK_BONUS: u64 = 50;

/// Top scores above this land in [`ScoreTier::High`].
pub const HIGH_TIER_THRESHOLD: u64 = 8000;

/// Top scores above this (and not High) land in [`ScoreTier::Mid`].
pub const MID_TIER_THRESHOLD: u64 = 3000;

/// Scoring constants.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Base points for a correct answer
    pub base_points: u64,
    /// Time bonus multiplier (points per unit of time left)
    pub time_bonus_scale: f32,
    /// Points per prior consecutive correct answer
    pub streak_bonus: u64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_points: BASE_POINTS,
            time_bonus_scale: TIME_BONUS_SCALE,
            streak_bonus: STREAK_BONUS,
        }
    }
}

impl ScoringConfig {
    /// Create config from environment variables.
    ///
    /// Missing or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_points: env_or("QUIZ_BASE_POINTS", defaults.base_points),
            time_bonus_scale: env_or("QUIZ_TIME_BONUS_SCALE", defaults.time_bonus_scale),
            streak_bonus: env_or("QUIZ_STREAK_BONUS", defaults.streak_bonus),
        }
    }

    /// Time bonus for `time_left`, truncated toward zero.
    ///
    /// NaN yields 0; out-of-range products saturate.
    #[inline]
    pub fn time_bonus(&self, time_left: f32) -> i64 {
        (time_left * self.time_bonus_scale) as i64
    }

    /// Points awarded for a correct answer given the streak before it.
    ///
    /// A negative time bonus can eat into the base award but the
    /// result never goes below zero.
    pub fn points_for_correct(&self, time_left: f32, streak_before: u32) -> u64 {
        let streak_part = u64::from(streak_before).saturating_mul(self.streak_bonus);
        let fixed = self.base_points.saturating_add(streak_part);
        let bonus = self.time_bonus(time_left);

        if bonus >= 0 {
            fixed.saturating_add(bonus as u64)
        } else {
            fixed.saturating_sub(bonus.unsigned_abs())
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

// =============================================================================
// SCORE TIER
// =============================================================================

/// Coarse band for the leading score, used by hosts to pick round commentary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreTier {
    /// Top score at or below the mid threshold
    Low,
    /// Top score above the mid threshold
    Mid,
    /// Top score above the high threshold
    High,
}

impl ScoreTier {
    /// Classify a top score.
    pub fn from_top_score(top: u64) -> Self {
        if top > HIGH_TIER_THRESHOLD {
            ScoreTier::High
        } else if top > MID_TIER_THRESHOLD {
            ScoreTier::Mid
        } else {
            ScoreTier::Low
        }
    }
}
