//! Host Protocol Messages
//!
//! Line-delimited JSON exchanged with the host process over stdio.
//! One request per line in, one reply per line out.

use serde::{Serialize, Deserialize};

use crate::game::events::ScoreEvent;
use crate::game::leaderboard::Standing;
use crate::game::scoring::ScoreTier;
use crate::game::state::JoinResult;

// =============================================================================
// HOST -> ENGINE REQUESTS
// =============================================================================

/// Requests sent by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostRequest {
    /// Register a player (or detect a reconnect).
    AddPlayer {
        /// Player ID
        id: String,
        /// Display name
        name: String,
    },

    /// Remove a player.
    RemovePlayer {
        /// Player ID
        id: String,
    },

    /// Score one answer.
    UpdateScore {
        /// Player ID
        id: String,
        /// Whether the answer was right
        correct: bool,
        /// Time remaining when the answer came in
        time_left: f32,
    },

    /// Ranked (name, score) pairs.
    GetLeaderboard,

    /// Ranked rows with id, streak and rank.
    Standings,

    /// Zero all scores and streaks.
    ResetScores,

    /// Registry hash.
    StateHash,

    /// Drain recorded events.
    TakeEvents,

    /// Liveness check.
    Ping,
}

// =============================================================================
// ENGINE -> HOST REPLIES
// =============================================================================

/// Replies sent back to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostReply {
    /// Emitted once at startup when the banner is enabled.
    Ready {
        /// Crate version
        version: String,
    },

    /// New player registered.
    Joined,

    /// Player id was already registered.
    Reconnect,

    /// Remove processed (whether or not the id existed).
    Removed,

    /// Score after an update (0 for unknown players).
    Score {
        /// Score after the update
        score: u64,
    },

    /// Ranked leaderboard.
    Leaderboard {
        /// (name, score), best first
        entries: Vec<(String, u64)>,
        /// Band of the top score
        tier: ScoreTier,
    },

    /// Ranked standings.
    Standings {
        /// Ranked rows
        standings: Vec<Standing>,
    },

    /// Scores reset.
    Reset {
        /// Number of players reset
        players: usize,
    },

    /// Hex-encoded registry hash.
    StateHash {
        /// Hex-encoded SHA-256
        hash: String,
    },

    /// Drained events.
    Events {
        /// Events in sequence order
        events: Vec<ScoreEvent>,
    },

    /// Ping response.
    Pong,

    /// Request could not be handled.
    Error(ReplyError),
}

impl From<JoinResult> for HostReply {
    fn from(result: JoinResult) -> Self {
        match result {
            JoinResult::Joined => HostReply::Joined,
            JoinResult::Reconnect => HostReply::Reconnect,
        }
    }
}

/// Error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyError {
    /// Error code.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
}

/// Error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Line was not a valid request.
    InvalidRequest,
    /// Reply could not be encoded.
    InternalError,
}

impl HostReply {
    /// Build an error reply.
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        HostReply::Error(ReplyError {
            code,
            message: message.into(),
        })
    }
}

// =============================================================================
// SERIALIZATION HELPERS
// =============================================================================

impl HostRequest {
    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

impl HostReply {
    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}
