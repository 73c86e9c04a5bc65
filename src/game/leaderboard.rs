//! Leaderboard Ranking
//!
//! Orders players by score, highest first. Equal scores fall back to
//! name (byte-wise ascending) and then id, so the order is total and
//! the same registry always produces the same board.

use std::cmp::Ordering;

use serde::{Serialize, Deserialize};

use crate::game::state::Player;

/// Leaderboard comparator: score desc, then name asc, then id asc.
pub fn leaderboard_order(a: &Player, b: &Player) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.id.cmp(&b.id))
}

/// Sort players into leaderboard order.
pub fn rank<'a, I>(players: I) -> Vec<&'a Player>
where
    I: IntoIterator<Item = &'a Player>,
{
    let mut ranked: Vec<&Player> = players.into_iter().collect();
    ranked.sort_unstable_by(|a, b| leaderboard_order(a, b));
    ranked
}

/// A ranked row with everything a host UI might show.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    /// 1-based position on the board (ties get consecutive ranks)
    pub rank: u32,
    /// Player ID
    pub id: String,
    /// Display name
    pub name: String,
    /// Current score
    pub score: u64,
    /// Current streak
    pub streak: u32,
}

/// Build standings from already-ranked players.
pub fn standings(ranked: &[&Player]) -> Vec<Standing> {
    ranked
        .iter()
        .enumerate()
        .map(|(i, p)| Standing {
            rank: u32::try_from(i + 1).unwrap_or(u32::MAX),
            id: p.id.to_string(),
            name: p.name.clone(),
            score: p.score,
            streak: p.streak,
        })
        .collect()
}

/// Point-in-time copy of the leaderboard.
///
/// Entries serialize as `[name, score]` pairs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardSnapshot {
    /// (name, score), best first
    pub entries: Vec<(String, u64)>,
}

impl LeaderboardSnapshot {
    /// Wrap an already-ordered entry list.
    pub fn new(entries: Vec<(String, u64)>) -> Self {
        Self { entries }
    }

    /// Highest score on the board, 0 when empty.
    pub fn top_score(&self) -> u64 {
        self.entries.first().map(|(_, score)| *score).unwrap_or(0)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nobody is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Serialize to binary.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Deserialize from binary.
    pub fn from_bytes(data: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(data)
    }
}

impl From<LeaderboardSnapshot> for Vec<(String, u64)> {
    fn from(snapshot: LeaderboardSnapshot) -> Self {
        snapshot.entries
    }
}

// =============================================================================
// TESTS
// =============================================================================
