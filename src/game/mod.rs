//! Game Logic Module
//!
//! Player registry, scoring rules and ranking.
//!
//! ## Module Structure
//!
//! - `state`: Player and player ID types
//! - `scoring`: Points formula and score tiers
//! - `leaderboard`: Ranking comparator and snapshots
//! - `events`: Events recorded on every registry mutation
//! - `engine`: The scoring engine itself

pub mod state;
pub mod scoring;
pub mod leaderboard;
pub mod events;
pub mod engine;

// Re-export key types
pub use state::{Player, PlayerId, JoinResult};
pub use scoring::{ScoringConfig, ScoreTier};
pub use leaderboard::{LeaderboardSnapshot, Standing};
pub use events::{ScoreEvent, ScoreEventData};
pub use engine::ScoringEngine;
