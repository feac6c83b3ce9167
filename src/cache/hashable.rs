//! Hashable Key Module
//!
//! Turns logical keys into deterministic string digests used for bucketing.

use std::fmt;
use std::hash::Hasher;

use fnv::FnvHasher;

// == Hashable Trait ==
/// Capability required of every key type stored in the cache.
///
/// Equal logical keys must yield equal digests, and the digest must not
/// depend on process state such as pointer addresses or random seeds.
pub trait Hashable {
    /// Returns the digest identifying this key inside the cache.
    fn digest(&self) -> String;
}

impl<T: Hashable + ?Sized> Hashable for &T {
    fn digest(&self) -> String {
        (**self).digest()
    }
}

// == Digest Helper ==
/// Hashes `bytes` with 64-bit FNV-1a and renders the result as lower-case hex.
///
/// The output is at most 16 characters; leading zeros are not padded.
/// Not a cryptographic hash.
pub fn fnv1a_hex(bytes: &[u8]) -> String {
    let mut hasher = FnvHasher::default();
    hasher.write(bytes);
    format!("{:x}", hasher.finish())
}

// == String Key ==
/// Key wrapper for string-identified cache entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StringKey(String);

impl StringKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Hashable for StringKey {
    fn digest(&self) -> String {
        fnv1a_hex(self.0.as_bytes())
    }
}

impl From<&str> for StringKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for StringKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl fmt::Display for StringKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// == Integer Key ==
/// Key wrapper for integer-identified cache entries.
///
/// Hashes the canonical decimal form, so `IntKey(-42)` digests `"-42"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntKey(i64);

impl IntKey {
    pub fn new(key: i64) -> Self {
        Self(key)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl Hashable for IntKey {
    fn digest(&self) -> String {
        fnv1a_hex(self.0.to_string().as_bytes())
    }
}

impl From<i64> for IntKey {
    fn from(key: i64) -> Self {
        Self(key)
    }
}

impl From<i32> for IntKey {
    fn from(key: i32) -> Self {
        Self(i64::from(key))
    }
}

impl From<u32> for IntKey {
    fn from(key: u32) -> Self {
        Self(i64::from(key))
    }
}

impl fmt::Display for IntKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
