//! Shared Engine Handle
//!
//! Serializes every engine operation through one async mutex so several
//! tasks can drive the same room without concurrent mutation.

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::core::hash::StateHash;
use crate::game::engine::ScoringEngine;
use crate::game::events::ScoreEvent;
use crate::game::leaderboard::Standing;
use crate::game::state::JoinResult;

/// Cloneable handle to one engine instance.
#[derive(Clone, Debug, Default)]
pub struct SharedEngine {
    inner: Arc<Mutex<ScoringEngine>>,
}

impl SharedEngine {
    /// Wrap an engine.
    pub fn new(engine: ScoringEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    /// See [`ScoringEngine::add_player`].
    pub async fn add_player(&self, id: &str, name: &str) -> JoinResult {
        self.inner.lock().await.add_player(id, name)
    }

    /// See [`ScoringEngine::remove_player`].
    pub async fn remove_player(&self, id: &str) {
        self.inner.lock().await.remove_player(id)
    }

    /// See [`ScoringEngine::update_score`].
    pub async fn update_score(&self, id: &str, correct: bool, time_left: f32) -> u64 {
        self.inner.lock().await.update_score(id, correct, time_left)
    }

    /// See [`ScoringEngine::get_leaderboard`].
    pub async fn get_leaderboard(&self) -> Vec<(String, u64)> {
        self.inner.lock().await.get_leaderboard()
    }

    /// See [`ScoringEngine::standings`].
    pub async fn standings(&self) -> Vec<Standing> {
        self.inner.lock().await.standings()
    }

    /// See [`ScoringEngine::reset_scores`].
    pub async fn reset_scores(&self) -> usize {
        self.inner.lock().await.reset_scores()
    }

    /// See [`ScoringEngine::state_hash`].
    pub async fn state_hash(&self) -> StateHash {
        self.inner.lock().await.state_hash()
    }

    /// See [`ScoringEngine::take_events`].
    pub async fn take_events(&self) -> Vec<ScoreEvent> {
        self.inner.lock().await.take_events()
    }

    /// Run a closure with exclusive access to the engine.
    ///
    /// For multi-step operations that must not interleave with other callers.
    pub async fn with_engine<R>(&self, f: impl FnOnce(&mut ScoringEngine) -> R) -> R {
        let mut engine = self.inner.lock().await;
        f(&mut engine)
    }
}
