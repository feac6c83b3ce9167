//! Configuration Module
//!
//! Handles loading the demo driver's settings from environment variables.

use std::env;
use std::str::FromStr;

use crate::error::{CacheError, Result};

/// Largest accepted `KEY_SPACE`.
///
/// Collatz trajectories of every key up to this bound stay far below
/// `u64::MAX`, and every key fits an `i64`.
pub const MAX_KEY_SPACE: u64 = 1_000_000;

/// Driver configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// Number of concurrent workers hitting the cache
    pub workers: usize,
    /// Lookups performed by each worker
    pub ops_per_worker: usize,
    /// Number of distinct logical keys the workers draw from
    pub key_space: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 100)
    /// - `WORKERS` - Concurrent workers (default: 10)
    /// - `OPS_PER_WORKER` - Lookups per worker (default: 100)
    /// - `KEY_SPACE` - Distinct keys to draw from (default: 250)
    ///
    /// Values that fail to parse fall back to their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            capacity: var_or("CACHE_CAPACITY", defaults.capacity),
            workers: var_or("WORKERS", defaults.workers),
            ops_per_worker: var_or("OPS_PER_WORKER", defaults.ops_per_worker),
            key_space: var_or("KEY_SPACE", defaults.key_space),
        }
    }

    /// Rejects settings the driver cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(CacheError::InvalidCapacity(self.capacity));
        }
        if self.workers == 0 {
            return Err(CacheError::InvalidConfig(
                "WORKERS must be greater than 0".to_string(),
            ));
        }
        if self.key_space == 0 {
            return Err(CacheError::InvalidConfig(
                "KEY_SPACE must be greater than 0".to_string(),
            ));
        }
        if self.key_space > MAX_KEY_SPACE {
            return Err(CacheError::InvalidConfig(format!(
                "KEY_SPACE must be at most {MAX_KEY_SPACE}, got {}",
                self.key_space
            )));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: 100,
            workers: 10,
            ops_per_worker: 100,
            key_space: 250,
        }
    }
}

fn var_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.capacity, 100);
        assert_eq!(config.workers, 10);
        assert_eq!(config.ops_per_worker, 100);
        assert_eq!(config.key_space, 250);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("CACHE_CAPACITY");
        env::remove_var("WORKERS");
        env::remove_var("OPS_PER_WORKER");
        env::remove_var("KEY_SPACE");

        let config = Config::from_env();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_var_or_falls_back_on_garbage() {
        env::set_var("MEMO_LRU_TEST_GARBAGE", "not-a-number");
        assert_eq!(var_or("MEMO_LRU_TEST_GARBAGE", 7usize), 7);

        env::set_var("MEMO_LRU_TEST_PADDED", " 42 ");
        assert_eq!(var_or("MEMO_LRU_TEST_PADDED", 7usize), 42);
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        let config = Config {
            capacity: 0,
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(CacheError::InvalidCapacity(0)));
    }

    #[test]
    fn test_validate_rejects_zero_workers_and_keys() {
        let no_workers = Config {
            workers: 0,
            ..Config::default()
        };
        assert!(matches!(
            no_workers.validate(),
            Err(CacheError::InvalidConfig(_))
        ));

        let no_keys = Config {
            key_space: 0,
            ..Config::default()
        };
        assert!(matches!(no_keys.validate(), Err(CacheError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_bounds_key_space() {
        let at_limit = Config {
            key_space: MAX_KEY_SPACE,
            ..Config::default()
        };
        assert!(at_limit.validate().is_ok());

        let too_big = Config {
            key_space: MAX_KEY_SPACE + 1,
            ..Config::default()
        };
        assert!(matches!(too_big.validate(), Err(CacheError::InvalidConfig(_))));

        let huge = Config {
            key_space: u64::MAX,
            ..Config::default()
        };
        assert!(matches!(huge.validate(), Err(CacheError::InvalidConfig(_))));
    }
}
