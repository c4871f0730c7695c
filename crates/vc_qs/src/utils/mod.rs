//! Small containers used across the crate.
//!
//! ## Menu
//!
//! - [`TypeIdMap`]: a map keyed by [`TypeId`](core::any::TypeId).
//! - [`FixedHashState`]: deterministic hashing for string keys.

// -----------------------------------------------------------------------------
// Modules

mod hash;
mod typeid_map;

// -----------------------------------------------------------------------------
// Exports

pub use hash::{FixedHashState, NoOpHashState, NoOpHasher};
pub use typeid_map::TypeIdMap;

/// An insertion ordered map with deterministic hashing.
pub type IndexMap<K, V> = indexmap::IndexMap<K, V, FixedHashState>;
