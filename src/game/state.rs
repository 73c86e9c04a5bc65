//! Player State Definitions
//!
//! Registry entry types for the scoring engine.
//! The registry itself is a BTreeMap so iteration (and hashing) is deterministic.

use std::borrow::Borrow;
use std::fmt;

use serde::{Serialize, Deserialize};

use crate::core::hash::StateHasher;

// =============================================================================
// PLAYER ID
// =============================================================================

/// External player identifier, as handed to us by the host.
///
/// Opaque to the engine: any string is accepted, including the empty one.
/// Implements Ord for deterministic BTreeMap ordering.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// Create from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PlayerId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for PlayerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// JOIN RESULT
// =============================================================================

/// Outcome of `ScoringEngine::add_player`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinResult {
    /// A new registry entry was created.
    Joined,
    /// The id was already registered; existing state kept as-is.
    Reconnect,
}

impl JoinResult {
    /// Wire name of this outcome ("Joined" / "Reconnect").
    pub fn as_str(self) -> &'static str {
        match self {
            JoinResult::Joined => "Joined",
            JoinResult::Reconnect => "Reconnect",
        }
    }
}

impl fmt::Display for JoinResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// PLAYER
// =============================================================================

/// State of a single registered player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Unique player ID
    pub id: PlayerId,

    /// Display name, fixed at join time
    pub name: String,

    /// Accumulated score (never decreases)
    pub score: u64,

    /// Consecutive correct answers since the last miss
    pub streak: u32,
}

impl Player {
    /// Create a fresh player with zero score and streak.
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            score: 0,
            streak: 0,
        }
    }

    /// Credit a correct answer worth `points`.
    ///
    /// Returns the new score.
    pub fn record_correct(&mut self, points: u64) -> u64 {
        self.score = self.score.saturating_add(points);
        self.streak = self.streak.saturating_add(1);
        self.score
    }

    /// Record a wrong answer. Returns the streak that was lost.
    pub fn record_miss(&mut self) -> u32 {
        std::mem::take(&mut self.streak)
    }

    /// Zero score and streak (new game, same roster).
    pub fn reset(&mut self) {
        self.score = 0;
        self.streak = 0;
    }

    /// Hash this player's state for verification.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_str(self.id.as_str());
        hasher.update_str(&self.name);
        hasher.update_u64(self.score);
        hasher.update_u32(self.streak);
    }
}

// =============================================================================
// TESTS
// =============================================================================
