//! Memo LRU - A thread-safe memoization cache
//!
//! Stores caller-computed values under deterministic key digests and evicts
//! the least recently used entry once capacity is reached.

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{CacheStats, Hashable, IntKey, LruCache, StringKey};
pub use config::Config;
pub use error::{CacheError, Result};
