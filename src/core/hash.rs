//! State Hashing for Verification
//!
//! Provides deterministic hashing of the player registry for:
//! - Divergence checks between the engine and a host-side mirror
//! - Cheap "did anything change" probes without copying the leaderboard

use sha2::{Sha256, Digest};

/// Hash output type (256 bits / 32 bytes)
pub type StateHash = [u8; 32];

/// Deterministic hasher for engine state.
///
/// Wraps SHA-256 with length-prefixed helpers so adjacent
/// variable-length fields cannot collide.
/// Order of updates is critical for determinism.
pub struct StateHasher {
    hasher: Sha256,
}

impl StateHasher {
    /// Create a new hasher with domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Create hasher for the player registry.
    pub fn for_registry() -> Self {
        Self::new(b"QUIZ_ENGINE_REGISTRY_V1")
    }

    /// Update with a u32 value (little-endian).
    #[inline]
    pub fn update_u32(&mut self, value: u32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a u64 value (little-endian).
    #[inline]
    pub fn update_u64(&mut self, value: u64) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a string, prefixed by its byte length.
    #[inline]
    pub fn update_str(&mut self, value: &str) {
        self.update_u64(value.len() as u64);
        self.hasher.update(value.as_bytes());
    }

    /// Finalize and return the hash.
    pub fn finalize(self) -> StateHash {
        self.hasher.finalize().into()
    }
}

/// Compute the registry hash.
///
/// Called by `ScoringEngine::state_hash()`. The player count goes in
/// first; the closure then adds each player in key order.
pub fn compute_registry_hash<F>(player_count: usize, add_players: F) -> StateHash
where
    F: FnOnce(&mut StateHasher),
{
    let mut hasher = StateHasher::for_registry();
    hasher.update_u64(player_count as u64);
    add_players(&mut hasher);
    hasher.finalize()
}

// =============================================================================
// TESTS
// =============================================================================
