//! Cache Store Module
//!
//! Thread-safe memoization cache combining the digest index with LRU eviction.

use std::fmt;
use std::marker::PhantomData;
use std::num::NonZeroUsize;

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::cache::{CacheStats, Hashable, LruIndex};
use crate::error::{CacheError, Result};

/// State guarded by the cache mutex.
struct Inner<V> {
    index: LruIndex<V>,
    stats: CacheStats,
}

// == LRU Cache ==
/// Capacity-bounded memoization cache with least-recently-used eviction.
///
/// Keys are any [`Hashable`] type; entries are stored by the key's digest, so
/// two keys with the same digest address the same entry. The cache never
/// computes values on its own: callers look up with [`get`](Self::get) and
/// store what they computed with [`set`](Self::set).
///
/// The digest index behind the facade is not part of the public API:
/// ```compile_fail
/// use memo_lru::cache::LruIndex;
/// ```
///
/// All operations take a single mutex for an O(1) critical section, so an
/// `Arc<LruCache<K, V>>` can be shared freely across threads.
///
/// # Example
/// ```
/// use memo_lru::{LruCache, StringKey};
///
/// let cache = LruCache::new(2).unwrap();
/// cache.set(&StringKey::new("a"), 1);
/// cache.set(&StringKey::new("b"), 2);
/// assert_eq!(cache.get(&StringKey::new("a")), Some(1));
///
/// cache.set(&StringKey::new("c"), 3); // evicts "b"
/// assert_eq!(cache.get(&StringKey::new("b")), None);
/// assert_eq!(cache.size(), 2);
/// ```
pub struct LruCache<K, V> {
    inner: Mutex<Inner<V>>,
    capacity: NonZeroUsize,
    _key: PhantomData<fn(&K)>,
}

impl<K: Hashable, V> LruCache<K, V> {
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// # Errors
    /// Returns [`CacheError::InvalidCapacity`] when `capacity` is 0.
    pub fn new(capacity: usize) -> Result<Self> {
        let capacity = NonZeroUsize::new(capacity).ok_or(CacheError::InvalidCapacity(capacity))?;
        debug!(capacity = capacity.get(), "created LRU cache");

        Ok(Self {
            inner: Mutex::new(Inner {
                index: LruIndex::new(capacity),
                stats: CacheStats::new(),
            }),
            capacity,
            _key: PhantomData,
        })
    }

    // == Get ==
    /// Returns a clone of the value cached for `key`, marking it most recently used.
    ///
    /// A miss returns `None` and leaves the cache untouched.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        let digest = key.digest();
        let mut guard = self.inner.lock();
        let Inner { index, stats } = &mut *guard;

        match index.get(&digest) {
            Some(value) => {
                stats.record_hit();
                Some(value.clone())
            }
            None => {
                stats.record_miss();
                None
            }
        }
    }

    // == Set ==
    /// Stores `value` for `key` as the most recently used entry.
    ///
    /// Overwriting a resident key keeps the size unchanged. Inserting a new key
    /// into a full cache evicts the least recently used entry.
    pub fn set(&self, key: &K, value: V) {
        let digest = key.digest();

        let evicted = {
            let mut guard = self.inner.lock();
            let Inner { index, stats } = &mut *guard;

            if index.contains(&digest) {
                stats.record_update();
            } else {
                stats.record_insertion();
            }

            let evicted = index.put(digest, value);
            if evicted.is_some() {
                stats.record_eviction();
            }
            evicted
        };

        // Evicted value is dropped here, outside the lock
        if let Some((digest, _)) = evicted {
            trace!(%digest, "evicted least recently used entry");
        }
    }

    // == Get Or Insert ==
    /// Returns the cached value for `key`, computing and storing it on a miss.
    ///
    /// `compute` runs without the lock held, so concurrent callers missing on
    /// the same key may each compute; the last one to finish wins the slot.
    pub fn get_or_insert_with<F>(&self, key: &K, compute: F) -> V
    where
        V: Clone,
        F: FnOnce() -> V,
    {
        if let Some(value) = self.get(key) {
            return value;
        }

        let value = compute();
        self.set(key, value.clone());
        value
    }

    /// Returns true if `key` is resident. Does not affect recency.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().index.contains(&key.digest())
    }

    // == Remove ==
    /// Drops the entry for `key`, returning its value if it was resident.
    pub fn remove(&self, key: &K) -> Option<V> {
        let digest = key.digest();
        self.inner.lock().index.remove(&digest)
    }

    /// Drops every entry. Counters are kept.
    pub fn clear(&self) {
        self.inner.lock().index.clear();
    }

    // == Size ==
    /// Returns the current number of entries.
    pub fn size(&self) -> usize {
        self.inner.lock().index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Returns the configured maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    // == Stats ==
    /// Returns a snapshot of the activity counters.
    pub fn stats(&self) -> CacheStats {
        let guard = self.inner.lock();
        let mut stats = guard.stats.clone();
        stats.set_total_entries(guard.index.len());
        stats
    }

    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        self.inner.lock().index.assert_consistent();
    }
}

impl<K, V> fmt::Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("size", &self.inner.lock().index.len())
            .field("capacity", &self.capacity.get())
            .finish()
    }
}
