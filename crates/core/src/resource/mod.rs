//! Cached access to game-data assets.

/// Read-through champion metadata cache.
pub mod cache;

pub use cache::{ResourceCache, CHAMPION_PATH};
