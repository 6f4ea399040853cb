//! Hash map aliases shared by the caches and context tables.
//!
//! The `std-hash` feature swaps the Fx maps for the standard library ones,
//! which is occasionally useful when hashing untrusted attribute keys.

#[cfg(feature = "std-hash")]
pub mod map {
    pub use std::collections::hash_map::Entry;
    pub use std::collections::{HashMap, HashSet};

    /// Creates an empty map with the configured hasher.
    pub fn new_map<K, V>() -> HashMap<K, V> {
        HashMap::new()
    }
}

#[cfg(not(feature = "std-hash"))]
pub mod map {
    pub use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
    pub use std::collections::hash_map::Entry;

    /// Creates an empty map with the configured hasher.
    pub fn new_map<K, V>() -> HashMap<K, V> {
        HashMap::default()
    }
}

/// Insertion-ordered map used for attribute bags and drag-engine options.
pub type OrderedMap<K, V> = indexmap::IndexMap<K, V>;
