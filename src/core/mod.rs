//! Core deterministic primitives.

pub mod hash;

// Re-export core types
pub use hash::{StateHash, StateHasher, compute_registry_hash};
