//! LRU Index Module
//!
//! Digest-keyed storage with O(1) recency tracking for cache eviction.

use std::num::NonZeroUsize;

use fnv::FnvHashMap;

/// Arena slot holding one live entry and its recency links.
#[derive(Debug)]
struct Node<V> {
    digest: String,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

// == LRU Index ==
/// Capacity-bounded digest → value store ordered by recency.
///
/// Entries live in a `Vec` arena and are linked by slot index:
/// - `head` = most recently used
/// - `tail` = least recently used
///
/// Slots vacated by eviction or removal go on a free list and are reused by
/// the next insert, so the arena never grows past `capacity` slots.
///
/// Not thread-safe on its own; `LruCache` wraps it in a mutex.
#[derive(Debug)]
pub struct LruIndex<V> {
    map: FnvHashMap<String, usize>,
    slots: Vec<Option<Node<V>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    capacity: NonZeroUsize,
}

impl<V> LruIndex<V> {
    // == Constructor ==
    /// Creates an empty index holding at most `capacity` entries.
    pub fn new(capacity: NonZeroUsize) -> Self {
        let cap = capacity.get();
        Self {
            map: FnvHashMap::with_capacity_and_hasher(cap, Default::default()),
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            capacity,
        }
    }

    // == Get ==
    /// Looks up `digest`, promoting the entry to most recently used on a hit.
    pub fn get(&mut self, digest: &str) -> Option<&V> {
        let idx = *self.map.get(digest)?;
        self.promote(idx);
        self.slots[idx].as_ref().map(|node| &node.value)
    }

    // == Peek ==
    /// Looks up `digest` without touching the recency order.
    #[allow(dead_code)]
    pub fn peek(&self, digest: &str) -> Option<&V> {
        let idx = *self.map.get(digest)?;
        self.slots[idx].as_ref().map(|node| &node.value)
    }

    /// Returns true if `digest` is resident. Does not promote.
    pub fn contains(&self, digest: &str) -> bool {
        self.map.contains_key(digest)
    }

    // == Put ==
    /// Stores `value` under `digest` as the most recently used entry.
    ///
    /// An existing entry has its value replaced in place. A new entry that
    /// would push the index past capacity first evicts the least recently
    /// used entry, which is handed back to the caller.
    pub fn put(&mut self, digest: String, value: V) -> Option<(String, V)> {
        if let Some(&idx) = self.map.get(&digest) {
            if let Some(node) = self.slots[idx].as_mut() {
                node.value = value;
            }
            self.promote(idx);
            return None;
        }

        let evicted = if self.map.len() >= self.capacity.get() {
            self.pop_back()
        } else {
            None
        };

        let idx = self.alloc();
        self.slots[idx] = Some(Node {
            digest: digest.clone(),
            value,
            prev: None,
            next: None,
        });
        self.push_front(idx);
        self.map.insert(digest, idx);

        evicted
    }

    // == Remove ==
    /// Drops the entry for `digest`, returning its value.
    pub fn remove(&mut self, digest: &str) -> Option<V> {
        let idx = self.map.remove(digest)?;
        self.unlink(idx);
        let node = self.slots[idx].take()?;
        self.free.push(idx);
        Some(node.value)
    }

    // == Evict Oldest ==
    /// Removes and returns the least recently used entry.
    pub fn pop_back(&mut self) -> Option<(String, V)> {
        let idx = self.tail?;
        self.unlink(idx);
        let node = self.slots[idx].take()?;
        self.map.remove(&node.digest);
        self.free.push(idx);
        Some((node.digest, node.value))
    }

    /// Drops every entry and releases the arena.
    pub fn clear(&mut self) {
        self.map.clear();
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[allow(dead_code)]
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Digests from most to least recently used.
    #[allow(dead_code)]
    pub fn iter_digests(&self) -> Digests<'_, V> {
        Digests {
            index: self,
            cursor: self.head,
        }
    }

    // == Internal Helpers ==

    fn promote(&mut self, idx: usize) {
        if self.head == Some(idx) {
            return;
        }
        self.unlink(idx);
        self.push_front(idx);
    }

    fn push_front(&mut self, idx: usize) {
        let old_head = self.head;
        if let Some(node) = self.slots[idx].as_mut() {
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(head_idx) => {
                if let Some(head) = self.slots[head_idx].as_mut() {
                    head.prev = Some(idx);
                }
            }
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match self.slots[idx].as_mut() {
            Some(node) => (node.prev.take(), node.next.take()),
            None => return,
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_node) = self.slots[prev_idx].as_mut() {
                    prev_node.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(next_idx) => {
                if let Some(next_node) = self.slots[next_idx].as_mut() {
                    next_node.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }

    fn alloc(&mut self) -> usize {
        match self.free.pop() {
            Some(idx) => idx,
            None => {
                self.slots.push(None);
                self.slots.len() - 1
            }
        }
    }

    /// Walks the list both ways and checks it against the map.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        let forward: Vec<&str> = self.iter_digests().collect();
        assert_eq!(forward.len(), self.map.len(), "list and map disagree on size");
        assert!(self.map.len() <= self.capacity.get(), "size exceeds capacity");
        assert!(self.slots.len() <= self.capacity.get(), "arena grew past capacity");

        for digest in &forward {
            assert!(self.map.contains_key(*digest), "listed digest {digest} not mapped");
        }

        let mut backward = Vec::new();
        let mut cursor = self.tail;
        while let Some(idx) = cursor {
            let node = self.slots[idx].as_ref().expect("linked slot is empty");
            backward.push(node.digest.as_str());
            cursor = node.prev;
        }
        backward.reverse();
        assert_eq!(forward, backward, "prev links disagree with next links");
    }

    #[cfg(test)]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

// == Digest Iterator ==
/// Iterator over resident digests, most recently used first.
#[allow(dead_code)]
pub struct Digests<'a, V> {
    index: &'a LruIndex<V>,
    cursor: Option<usize>,
}

impl<'a, V> Iterator for Digests<'a, V> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.index;
        let node = index.slots[self.cursor?].as_ref()?;
        self.cursor = node.next;
        Some(node.digest.as_str())
    }
}
