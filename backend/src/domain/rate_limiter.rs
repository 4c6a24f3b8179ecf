//! Per-key fixed-window admission control for the write path.
//!
//! Each key (in practice an author id) owns a bucket holding the number of
//! admitted requests in the current window and the instant the window ends.
//! The first request after a window ends replaces the bucket instead of
//! resetting its counter in place.
//!
//! Fixed windows admit up to `2 × max_per_window` requests across a window
//! boundary. That burst is accepted in exchange for O(1) state per key.
//!
//! Buckets live in a fixed set of mutex-guarded shards chosen by key hash.
//! The lookup, comparison and mutation for one key all happen under its
//! shard lock, so concurrent callers can never push a key past its budget.
//! Keys on different shards never contend.

use std::collections::HashMap;
use std::hash::{BuildHasher, RandomState};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;

const SHARD_COUNT: usize = 16;
const SHARD_MASK: u64 = 15;

/// Default window length.
pub const DEFAULT_RATE_LIMIT_WINDOW: Duration = Duration::from_secs(60);
/// Default number of admits per window.
pub const DEFAULT_RATE_LIMIT_MAX_PER_WINDOW: u32 = 20;

/// Rate limiter configuration, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// When false every request is admitted and nothing is tracked.
    pub enabled: bool,
    /// Length of one counting window.
    pub window: Duration,
    /// Maximum admits per key per window.
    pub max_per_window: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            window: DEFAULT_RATE_LIMIT_WINDOW,
            max_per_window: DEFAULT_RATE_LIMIT_MAX_PER_WINDOW,
        }
    }
}

impl RateLimitConfig {
    /// Configuration that admits everything.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

/// Outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The request fits in the current window.
    Admitted,
    /// The key exhausted its budget; the window resets after `retry_after`.
    Denied { retry_after: Duration },
}

impl Admission {
    /// Whether the request was admitted.
    #[must_use]
    pub fn is_admitted(self) -> bool {
        matches!(self, Self::Admitted)
    }
}

#[derive(Debug, Clone, Copy)]
struct RateBucket {
    count: u32,
    window_reset_at: DateTime<Utc>,
}

impl RateBucket {
    fn fresh(now: DateTime<Utc>, window: TimeDelta) -> Self {
        Self {
            count: 1,
            window_reset_at: now
                .checked_add_signed(window)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }
}

type Shard = Mutex<HashMap<String, RateBucket>>;

/// Concurrency-safe fixed-window rate limiter.
///
/// Construct one per service instance and share it by [`Arc`].
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// use feed_backend::domain::{RateLimitConfig, RateLimiter};
/// use mockable::DefaultClock;
///
/// let limiter = RateLimiter::new(
///     RateLimitConfig {
///         enabled: true,
///         window: Duration::from_secs(60),
///         max_per_window: 1,
///     },
///     Arc::new(DefaultClock),
/// );
/// assert!(limiter.allow("u1"));
/// assert!(!limiter.allow("u1"));
/// assert!(limiter.allow("u2"));
/// ```
pub struct RateLimiter {
    config: RateLimitConfig,
    window: TimeDelta,
    clock: Arc<dyn Clock>,
    hasher: RandomState,
    shards: [Shard; SHARD_COUNT],
}

impl RateLimiter {
    /// Build a limiter reading time from `clock`.
    pub fn new(config: RateLimitConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            window: TimeDelta::from_std(config.window).unwrap_or(TimeDelta::MAX),
            clock,
            hasher: RandomState::new(),
            shards: std::array::from_fn(|_| Mutex::new(HashMap::new())),
        }
    }

    /// Configuration this limiter was built with.
    pub fn config(&self) -> RateLimitConfig {
        self.config
    }

    /// Admission predicate: `true` when the request for `key` may proceed.
    pub fn allow(&self, key: &str) -> bool {
        self.check(key).is_admitted()
    }

    /// Admission check that also reports when a denied key may retry.
    pub fn check(&self, key: &str) -> Admission {
        if !self.config.enabled {
            return Admission::Admitted;
        }

        let now = self.clock.utc();
        let mut buckets = self.lock_shard(key);
        match buckets.get_mut(key) {
            Some(bucket) if now < bucket.window_reset_at => {
                if bucket.count < self.config.max_per_window {
                    bucket.count = bucket.count.saturating_add(1);
                    Admission::Admitted
                } else {
                    Admission::Denied {
                        retry_after: (bucket.window_reset_at - now)
                            .to_std()
                            .unwrap_or(Duration::ZERO),
                    }
                }
            }
            Some(bucket) => {
                *bucket = RateBucket::fresh(now, self.window);
                Admission::Admitted
            }
            None => {
                buckets.insert(key.to_owned(), RateBucket::fresh(now, self.window));
                Admission::Admitted
            }
        }
    }

    /// Number of keys with a bucket.
    pub fn tracked_keys(&self) -> usize {
        self.shards
            .iter()
            .map(|shard| shard.lock().unwrap_or_else(PoisonError::into_inner).len())
            .sum()
    }

    fn lock_shard(&self, key: &str) -> MutexGuard<'_, HashMap<String, RateBucket>> {
        let index = usize::try_from(self.hasher.hash_one(key) & SHARD_MASK).unwrap_or_default();
        #[expect(
            clippy::indexing_slicing,
            reason = "index is masked below SHARD_COUNT"
        )]
        let shard = &self.shards[index];
        // A panic while holding the lock cannot leave a bucket half-written.
        shard.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
