//! Memo LRU - demo driver
//!
//! Memoizes an expensive computation across concurrent workers sharing one
//! cache, then reports the cache statistics as JSON on stdout.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use memo_lru::{Config, IntKey, LruCache};

/// Main entry point for the memoization demo.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load and validate configuration from environment variables
/// 3. Create the shared cache
/// 4. Run workers that look up (or compute and store) Collatz stopping times
/// 5. Print the final statistics
#[tokio::main]
async fn main() -> Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "memo_lru=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    config.validate().context("invalid configuration")?;
    info!(
        "Configuration loaded: capacity={}, workers={}, ops_per_worker={}, key_space={}",
        config.capacity, config.workers, config.ops_per_worker, config.key_space
    );

    let cache: Arc<LruCache<IntKey, u64>> =
        Arc::new(LruCache::new(config.capacity).context("failed to create cache")?);

    let mut handles = Vec::with_capacity(config.workers);
    for worker in 0..config.workers {
        let cache = Arc::clone(&cache);
        let config = config.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            run_worker(worker, &cache, &config)
        }));
    }

    let mut checksum: u64 = 0;
    for handle in handles {
        checksum = checksum.wrapping_add(handle.await.context("worker panicked")?);
    }

    let stats = cache.stats();
    info!(
        hits = stats.hits,
        misses = stats.misses,
        evictions = stats.evictions,
        hit_rate = stats.hit_rate(),
        "Workload complete"
    );
    debug!(checksum, "sum of all looked-up values");

    println!(
        "{}",
        serde_json::to_string_pretty(&stats).context("failed to serialize stats")?
    );
    Ok(())
}

/// Performs `ops_per_worker` memoized lookups and returns the sum of results.
fn run_worker(worker: usize, cache: &LruCache<IntKey, u64>, config: &Config) -> u64 {
    let mut state = (worker as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15) | 1;
    let mut sum: u64 = 0;

    for _ in 0..config.ops_per_worker {
        // xorshift keeps the key sequence reproducible per worker
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        // validate() caps key_space at MAX_KEY_SPACE, so n fits an i64
        let n = 1 + state % config.key_space;

        let steps = cache.get_or_insert_with(&IntKey::new(n as i64), || collatz_steps(n));
        sum = sum.wrapping_add(steps);
    }

    debug!(worker, "worker finished");
    sum
}

/// Number of Collatz steps needed for `n` to reach 1.
fn collatz_steps(mut n: u64) -> u64 {
    let mut steps = 0;
    while n > 1 {
        n = if n % 2 == 0 { n / 2 } else { 3 * n + 1 };
        steps += 1;
    }
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use memo_lru::config::MAX_KEY_SPACE;

    #[test]
    fn test_collatz_steps() {
        assert_eq!(collatz_steps(1), 0);
        assert_eq!(collatz_steps(2), 1);
        assert_eq!(collatz_steps(6), 8);
        assert_eq!(collatz_steps(27), 111);
    }

    #[test]
    fn test_run_worker_matches_uncached() {
        let config = Config {
            capacity: 8,
            workers: 1,
            ops_per_worker: 200,
            key_space: 50,
        };
        let cache = LruCache::new(config.capacity).unwrap();
        let warm = run_worker(3, &cache, &config);

        let big = LruCache::new(1000).unwrap();
        assert_eq!(run_worker(3, &big, &config), warm);
        assert!(cache.size() <= config.capacity);
        assert!(cache.stats().hits > 0 || big.stats().hits > 0);
    }

    #[test]
    fn test_run_worker_at_max_key_space() {
        let config = Config {
            capacity: 16,
            workers: 1,
            ops_per_worker: 500,
            key_space: MAX_KEY_SPACE,
        };
        assert!(config.validate().is_ok());

        let cache = LruCache::new(config.capacity).unwrap();
        run_worker(0, &cache, &config);
        run_worker(7, &cache, &config);
        assert!(cache.size() <= config.capacity);
    }

    #[test]
    fn test_collatz_steps_largest_key() {
        // 837799 has the longest trajectory below one million
        assert_eq!(collatz_steps(837_799), 524);
        assert!(collatz_steps(MAX_KEY_SPACE) > 0);
    }
}
