//! # Quiz Scoring Engine
//!
//! In-memory player registry and scoring for real-time quiz games.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    QUIZ ENGINE                               │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  └── hash.rs     - Registry hashing for verification         │
//! │                                                              │
//! │  game/           - Scoring logic                             │
//! │  ├── state.rs    - Player and player ID                      │
//! │  ├── scoring.rs  - Points formula, score tiers               │
//! │  ├── leaderboard.rs - Ranking and snapshots                  │
//! │  ├── events.rs   - Mutation events                           │
//! │  └── engine.rs   - ScoringEngine                             │
//! │                                                              │
//! │  host/           - Host boundary                             │
//! │  ├── protocol.rs - JSON request/reply types                  │
//! │  ├── shared.rs   - Mutex-serialized engine handle            │
//! │  └── server.rs   - Line-delimited stdio adapter              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Scoring
//!
//! A correct answer is worth `1000 + trunc(time_left * 100) + streak * 50`,
//! using the streak from before the answer. A wrong answer resets the
//! streak and leaves the score alone. Unknown players score 0 and are
//! never created implicitly.
//!
//! ```
//! use quiz_engine::{ScoringEngine, JoinResult};
//!
//! let mut engine = ScoringEngine::new();
//! assert_eq!(engine.add_player("p1", "Alice"), JoinResult::Joined);
//! assert_eq!(engine.update_score("p1", true, 3.5), 1350);
//! assert_eq!(engine.update_score("p1", true, 2.0), 2600);
//! assert_eq!(engine.get_leaderboard(), vec![("Alice".to_string(), 2600)]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod host;

// Re-export commonly used types
pub use game::engine::ScoringEngine;
pub use game::state::{JoinResult, Player, PlayerId};
pub use game::scoring::{ScoringConfig, ScoreTier};
pub use game::leaderboard::{LeaderboardSnapshot, Standing};
pub use host::SharedEngine;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
