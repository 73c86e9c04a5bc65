//! Scoring Engine
//!
//! Owns the player registry and implements join / leave / score / rank.
//!
//! Every operation is total: unknown ids are silently ignored (or score 0),
//! duplicate joins report `Reconnect`, and nothing ever returns an error.
//! Mutations take `&mut self`; share across tasks via [`crate::host::SharedEngine`].

use std::collections::{BTreeMap, VecDeque};

use tracing::debug;

use crate::core::hash::{StateHash, compute_registry_hash};
use crate::game::events::{ScoreEvent, ScoreEventData};
use crate::game::leaderboard::{self, LeaderboardSnapshot, Standing};
use crate::game::scoring::{ScoreTier, ScoringConfig};
use crate::game::state::{JoinResult, Player, PlayerId};

/// Default cap on undrained events.
pub const MAX_PENDING_EVENTS: usize = 1024;

/// In-memory scoring engine for one game room.
#[derive(Clone, Debug)]
pub struct ScoringEngine {
    /// Scoring constants
    config: ScoringConfig,

    /// All players (BTreeMap for deterministic iteration)
    players: BTreeMap<PlayerId, Player>,

    /// Events recorded since the last drain (oldest dropped past the cap)
    pending_events: VecDeque<ScoreEvent>,

    /// Maximum undrained events kept
    event_capacity: usize,

    /// Next event sequence number
    next_seq: u64,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self {
            config: ScoringConfig::default(),
            players: BTreeMap::new(),
            pending_events: VecDeque::new(),
            event_capacity: MAX_PENDING_EVENTS,
            next_seq: 0,
        }
    }
}

impl ScoringEngine {
    /// Create an empty engine with the default scoring rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty engine with custom scoring rules.
    pub fn with_config(config: ScoringConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Set how many undrained events are kept.
    ///
    /// Past the cap the oldest event is dropped; `seq` keeps counting,
    /// so a consumer sees the gap. A capacity of 0 disables recording.
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        while self.pending_events.len() > capacity {
            self.pending_events.pop_front();
        }
        self
    }

    /// Scoring rules in effect.
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Register a player, or report that the id is already known.
    ///
    /// A known id is left untouched, even if `name` differs.
    pub fn add_player(&mut self, id: &str, name: &str) -> JoinResult {
        if self.players.contains_key(id) {
            debug!(player = id, "reconnect");
            self.push_event(ScoreEventData::PlayerReconnected {
                player_id: PlayerId::from(id),
            });
            return JoinResult::Reconnect;
        }

        let player_id = PlayerId::from(id);
        self.players
            .insert(player_id.clone(), Player::new(player_id.clone(), name));
        debug!(player = id, name, "player joined");
        self.push_event(ScoreEventData::PlayerJoined {
            player_id,
            name: name.to_owned(),
        });
        JoinResult::Joined
    }

    /// Remove a player. Unknown ids are ignored.
    pub fn remove_player(&mut self, id: &str) {
        if let Some(player) = self.players.remove(id) {
            debug!(player = id, score = player.score, "player removed");
            self.push_event(ScoreEventData::PlayerRemoved { player_id: player.id });
        }
    }

    /// Apply one answer and return the player's score afterwards.
    ///
    /// Unknown ids return 0 without touching anything.
    pub fn update_score(&mut self, id: &str, correct: bool, time_left: f32) -> u64 {
        let Some(player) = self.players.get_mut(id) else {
            debug!(player = id, "score update for unknown player ignored");
            return 0;
        };

        let event = if correct {
            let points = self.config.points_for_correct(time_left, player.streak);
            let new_score = player.record_correct(points);
            ScoreEventData::AnswerScored {
                player_id: player.id.clone(),
                points,
                new_score,
                streak: player.streak,
            }
        } else {
            ScoreEventData::StreakReset {
                player_id: player.id.clone(),
                lost_streak: player.record_miss(),
            }
        };

        let score = player.score;
        debug!(player = id, correct, time_left, score, "score updated");
        self.push_event(event);
        score
    }

    /// Ranked `(name, score)` pairs, best first.
    pub fn get_leaderboard(&self) -> Vec<(String, u64)> {
        leaderboard::rank(self.players.values())
            .into_iter()
            .map(|p| (p.name.clone(), p.score))
            .collect()
    }

    /// Leaderboard wrapped for serialization.
    pub fn snapshot(&self) -> LeaderboardSnapshot {
        LeaderboardSnapshot::new(self.get_leaderboard())
    }

    /// Leaderboard rows including id, streak and rank.
    pub fn standings(&self) -> Vec<Standing> {
        let ranked = leaderboard::rank(self.players.values());
        leaderboard::standings(&ranked)
    }

    /// Zero every score and streak but keep the roster.
    ///
    /// Returns the number of players reset.
    pub fn reset_scores(&mut self) -> usize {
        for player in self.players.values_mut() {
            player.reset();
        }
        let count = self.players.len();
        debug!(players = count, "scores reset");
        self.push_event(ScoreEventData::ScoresReset {
            player_count: u32::try_from(count).unwrap_or(u32::MAX),
        });
        count
    }

    /// Look up a player.
    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.get(id)
    }

    /// Number of registered players.
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// True when no players are registered.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Highest current score, 0 when empty.
    pub fn top_score(&self) -> u64 {
        self.players.values().map(|p| p.score).max().unwrap_or(0)
    }

    /// Band of the current top score.
    pub fn score_tier(&self) -> ScoreTier {
        ScoreTier::from_top_score(self.top_score())
    }

    /// Compute hash of the registry.
    pub fn state_hash(&self) -> StateHash {
        compute_registry_hash(self.players.len(), |hasher| {
            // BTreeMap iterates in id order
            for player in self.players.values() {
                player.hash_into(hasher);
            }
        })
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<ScoreEvent> {
        self.pending_events.drain(..).collect()
    }

    /// Number of events waiting to be drained.
    pub fn pending_event_count(&self) -> usize {
        self.pending_events.len()
    }

    fn push_event(&mut self, data: ScoreEventData) {
        let seq = self.next_seq;
        self.next_seq += 1;
        if self.event_capacity == 0 {
            return;
        }
        if self.pending_events.len() >= self.event_capacity {
            self.pending_events.pop_front();
        }
        self.pending_events.push_back(ScoreEvent::new(seq, data));
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_join_then_reconnect() {
        let mut engine = ScoringEngine::new();

        assert_eq!(engine.add_player("p1", "Alice"), JoinResult::Joined);
        assert_eq!(engine.add_player("p1", "Someone Else"), JoinResult::Reconnect);

        // Name from the first join is kept
        assert_eq!(engine.player("p1").unwrap().name, "Alice");
        assert_eq!(engine.player_count(), 1);
    }

    #[test]
    fn test_reconnect_preserves_score() {
        let mut engine = ScoringEngine::new();
        engine.add_player("p1", "Alice");
        engine.update_score("p1", true, 3.5);

        assert_eq!(engine.add_player("p1", "Alice"), JoinResult::Reconnect);
        let player = engine.player("p1").unwrap();
        assert_eq!(player.score, 1350);
        assert_eq!(player.streak, 1);
    }

    #[test]
    fn test_new_player_on_leaderboard() {
        let mut engine = ScoringEngine::new();
        engine.add_player("p1", "Alice");

        assert_eq!(engine.get_leaderboard(), vec![("Alice".to_string(), 0)]);
    }

    #[test]
    fn test_empty_name_accepted() {
        let mut engine = ScoringEngine::new();
        assert_eq!(engine.add_player("", ""), JoinResult::Joined);
        assert_eq!(engine.get_leaderboard(), vec![(String::new(), 0)]);
    }

    #[test]
    fn test_unknown_player_scores_zero() {
        let mut engine = ScoringEngine::new();

        assert_eq!(engine.update_score("unknown", true, 5.0), 0);
        assert!(engine.get_leaderboard().is_empty());
        assert!(engine.take_events().is_empty());
    }

    #[test]
    fn test_scoring_sequence() {
        let mut engine = ScoringEngine::new();
        engine.add_player("p1", "Alice");

        assert_eq!(engine.update_score("p1", true, 3.5), 1350);
        // Streak was 1 at call time
        assert_eq!(engine.update_score("p1", true, 2.0), 2600);

        // Wrong answer keeps the score, clears the streak
        assert_eq!(engine.update_score("p1", false, 1.0), 2600);
        assert_eq!(engine.player("p1").unwrap().streak, 0);

        assert_eq!(engine.update_score("p1", true, 0.0), 3600);
    }

    #[test]
    fn test_time_bonus_truncation() {
        let mut engine = ScoringEngine::new();
        engine.add_player("p1", "Alice");

        assert_eq!(engine.update_score("p1", true, 1.999), 1199);
    }

    #[test]
    fn test_remove_player() {
        let mut engine = ScoringEngine::new();
        engine.add_player("p1", "Alice");
        engine.add_player("p2", "Bob");

        engine.remove_player("p1");
        assert_eq!(engine.get_leaderboard(), vec![("Bob".to_string(), 0)]);

        // Score updates after removal are no-ops
        assert_eq!(engine.update_score("p1", true, 1.0), 0);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut engine = ScoringEngine::new();
        engine.add_player("p1", "Alice");
        engine.update_score("p1", true, 1.0);
        let before = engine.get_leaderboard();

        engine.remove_player("ghost");
        engine.remove_player("ghost");

        assert_eq!(engine.get_leaderboard(), before);
    }

    #[test]
    fn test_rejoin_after_remove_starts_fresh() {
        let mut engine = ScoringEngine::new();
        engine.add_player("p1", "Alice");
        engine.update_score("p1", true, 1.0);
        engine.remove_player("p1");

        assert_eq!(engine.add_player("p1", "Alicia"), JoinResult::Joined);
        assert_eq!(engine.get_leaderboard(), vec![("Alicia".to_string(), 0)]);
    }

    #[test]
    fn test_leaderboard_order_and_ties() {
        let mut engine = ScoringEngine::new();
        engine.add_player("p1", "Carol");
        engine.add_player("p2", "Alice");
        engine.add_player("p3", "Bob");

        engine.update_score("p3", true, 5.0);

        assert_eq!(
            engine.get_leaderboard(),
            vec![
                ("Bob".to_string(), 1500),
                ("Alice".to_string(), 0),
                ("Carol".to_string(), 0),
            ]
        );
    }

    #[test]
    fn test_snapshot_matches_leaderboard() {
        let mut engine = ScoringEngine::new();
        engine.add_player("p1", "Alice");
        engine.add_player("p2", "Bob");
        engine.update_score("p1", true, 0.5);

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.top_score(), 1050);
        assert_eq!(Vec::from(snapshot), engine.get_leaderboard());
    }

    #[test]
    fn test_standings_include_streak() {
        let mut engine = ScoringEngine::new();
        engine.add_player("p1", "Alice");
        engine.add_player("p2", "Bob");
        engine.update_score("p2", true, 0.0);
        engine.update_score("p2", true, 0.0);

        let rows = engine.standings();
        assert_eq!(rows[0].id, "p2");
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].streak, 2);
        assert_eq!(rows[0].score, 2050);
        assert_eq!(rows[1].name, "Alice");
        assert_eq!(rows[1].rank, 2);
    }

    #[test]
    fn test_reset_scores_keeps_roster() {
        let mut engine = ScoringEngine::new();
        engine.add_player("p1", "Alice");
        engine.add_player("p2", "Bob");
        engine.update_score("p1", true, 9.0);
        engine.update_score("p2", true, 2.0);

        assert_eq!(engine.reset_scores(), 2);
        assert_eq!(engine.player_count(), 2);
        assert!(engine.standings().iter().all(|s| s.score == 0 && s.streak == 0));

        // Streak bonus starts over too
        assert_eq!(engine.update_score("p1", true, 0.0), 1000);
    }

    #[test]
    fn test_top_score_and_tier() {
        let mut engine = ScoringEngine::new();
        assert_eq!(engine.top_score(), 0);
        assert_eq!(engine.score_tier(), ScoreTier::Low);

        engine.add_player("p1", "Alice");
        engine.update_score("p1", true, 10.0);
        engine.update_score("p1", true, 10.0);
        assert_eq!(engine.top_score(), 4050);
        assert_eq!(engine.score_tier(), ScoreTier::Mid);
    }

    #[test]
    fn test_custom_config() {
        let mut engine = ScoringEngine::with_config(ScoringConfig {
            base_points: 100,
            time_bonus_scale: 10.0,
            streak_bonus: 1,
        });
        engine.add_player("p1", "Alice");

        assert_eq!(engine.update_score("p1", true, 1.5), 115);
        assert_eq!(engine.update_score("p1", true, 0.0), 216);
    }

    #[test]
    fn test_events_recorded_in_order() {
        let mut engine = ScoringEngine::new();
        engine.add_player("p1", "Alice");
        engine.add_player("p1", "Alice");
        engine.update_score("p1", true, 3.5);
        engine.update_score("p1", false, 0.0);
        engine.remove_player("p1");
        engine.remove_player("p1");

        let events = engine.take_events();
        let seqs: Vec<_> = events.iter().map(|e| e.seq).collect();
        assert_eq!(seqs, vec![0, 1, 2, 3, 4]);

        assert!(matches!(events[0].data, ScoreEventData::PlayerJoined { .. }));
        assert!(matches!(events[1].data, ScoreEventData::PlayerReconnected { .. }));
        assert!(matches!(
            events[2].data,
            ScoreEventData::AnswerScored { points: 1350, new_score: 1350, streak: 1, .. }
        ));
        assert!(matches!(events[3].data, ScoreEventData::StreakReset { lost_streak: 1, .. }));
        assert!(matches!(events[4].data, ScoreEventData::PlayerRemoved { .. }));

        // Drained
        assert!(engine.take_events().is_empty());

        // Sequence keeps counting after a drain
        engine.add_player("p2", "Bob");
        assert_eq!(engine.take_events()[0].seq, 5);
    }

    #[test]
    fn test_undrained_events_stay_bounded() {
        let mut engine = ScoringEngine::new();
        engine.add_player("p1", "Alice");

        for _ in 0..100_000 {
            engine.update_score("p1", false, 0.0);
            engine.add_player("p1", "Alice");
        }

        assert_eq!(engine.player_count(), 1);
        assert_eq!(engine.pending_event_count(), MAX_PENDING_EVENTS);

        // Oldest were dropped; the newest survive with their sequence numbers
        let events = engine.take_events();
        assert_eq!(events.last().unwrap().seq, 200_000);
        assert_eq!(events.first().unwrap().seq, 200_001 - MAX_PENDING_EVENTS as u64);
        assert_eq!(engine.pending_event_count(), 0);
    }

    #[test]
    fn test_event_capacity() {
        let mut engine = ScoringEngine::new().with_event_capacity(2);
        engine.add_player("p1", "Alice");
        engine.add_player("p2", "Bob");
        engine.add_player("p3", "Carol");

        let seqs: Vec<_> = engine.take_events().iter().map(|e| e.seq).collect();
        assert_eq!(seqs, vec![1, 2]);

        let mut silent = ScoringEngine::new().with_event_capacity(0);
        silent.add_player("p1", "Alice");
        silent.update_score("p1", true, 1.0);
        assert_eq!(silent.pending_event_count(), 0);
        assert_eq!(silent.get_leaderboard(), vec![("Alice".to_string(), 1100)]);
    }

    #[test]
    fn test_state_hash_ignores_insertion_order() {
        let mut ids: Vec<(String, String)> = (0..16)
            .map(|i| (format!("p{i}"), format!("Player {i}")))
            .collect();

        let mut first = ScoringEngine::new();
        for (id, name) in &ids {
            first.add_player(id, name);
        }

        let mut rng = StdRng::seed_from_u64(12345);
        ids.shuffle(&mut rng);

        let mut second = ScoringEngine::new();
        for (id, name) in &ids {
            second.add_player(id, name);
        }

        assert_eq!(first.state_hash(), second.state_hash());
        assert_eq!(first.get_leaderboard(), second.get_leaderboard());
    }

    #[test]
    fn test_state_hash_tracks_mutation() {
        let mut engine = ScoringEngine::new();
        engine.add_player("p1", "Alice");
        let before = engine.state_hash();

        engine.update_score("p1", false, 0.0);
        // A miss with no streak changes nothing
        assert_eq!(engine.state_hash(), before);

        engine.update_score("p1", true, 0.0);
        assert_ne!(engine.state_hash(), before);
    }
}
