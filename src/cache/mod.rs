//! Cache Module
//!
//! Provides a thread-safe memoization cache with LRU eviction over hashable keys.

mod hashable;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use hashable::{fnv1a_hex, Hashable, IntKey, StringKey};
pub(crate) use lru::LruIndex;
pub use stats::CacheStats;
pub use store::LruCache;
