//! Score Events
//!
//! Events recorded by the engine for each registry mutation.
//! Hosts drain them with `ScoringEngine::take_events()`.

use serde::{Serialize, Deserialize};

use crate::game::state::PlayerId;

/// Score event data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoreEventData {
    /// New player registered
    PlayerJoined {
        /// Player involved
        player_id: PlayerId,
        /// Display name
        name: String,
    },

    /// Join for an id that was already registered
    PlayerReconnected {
        /// Player involved
        player_id: PlayerId,
    },

    /// Player removed from the registry
    PlayerRemoved {
        /// Player involved
        player_id: PlayerId,
    },

    /// Correct answer credited
    AnswerScored {
        /// Player involved
        player_id: PlayerId,
        /// Points awarded for this answer
        points: u64,
        /// Score after the award
        new_score: u64,
        /// Streak after the award
        streak: u32,
    },

    /// Wrong answer; streak dropped to zero
    StreakReset {
        /// Player involved
        player_id: PlayerId,
        /// Streak before the miss
        lost_streak: u32,
    },

    /// Every score and streak zeroed
    ScoresReset {
        /// Players whose scores were zeroed
        player_count: u32,
    },
}

/// A recorded event with its sequence number.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEvent {
    /// Monotonic per-engine sequence number
    pub seq: u64,

    /// Event data
    #[serde(flatten)]
    pub data: ScoreEventData,
}

impl ScoreEvent {
    /// Create a new event.
    pub fn new(seq: u64, data: ScoreEventData) -> Self {
        Self { seq, data }
    }

    /// Player involved, if any.
    pub fn player_id(&self) -> Option<&PlayerId> {
        match &self.data {
            ScoreEventData::PlayerJoined { player_id, .. }
            | ScoreEventData::PlayerReconnected { player_id }
            | ScoreEventData::PlayerRemoved { player_id }
            | ScoreEventData::AnswerScored { player_id, .. }
            | ScoreEventData::StreakReset { player_id, .. } => Some(player_id),
            ScoreEventData::ScoresReset { .. } => None,
        }
    }
}
