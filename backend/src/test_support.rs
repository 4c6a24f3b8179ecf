//! Test utilities for the backend crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Compiled for tests and when the `test-support` feature is enabled.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

use crate::domain::{
    FollowService, PostCommandService, RateLimitConfig, RateLimiter, TimelineService,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{InMemoryPostRepository, InMemorySocialGraph};

/// Clock whose current instant is set by the test.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance(&self, delta: Duration) {
        let delta = match TimeDelta::from_std(delta) {
            Ok(delta) => delta,
            Err(error) => {
                panic!("failed to convert Duration to TimeDelta: {error}; delta={delta:?}")
            }
        };
        *self.lock_clock() += delta;
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Identifier generator yielding `prefix-1`, `prefix-2`, ... in call order.
pub struct SequentialIds {
    prefix: &'static str,
    next: Mutex<u64>,
}

impl SequentialIds {
    pub fn new(prefix: &'static str) -> Self {
        Self {
            prefix,
            next: Mutex::new(1),
        }
    }
}

impl crate::domain::ports::IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        let mut next = match self.next.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("id mutex"),
        };
        let id = format!("{}-{}", self.prefix, *next);
        *next += 1;
        id
    }
}

/// HTTP state over fresh in-memory stores.
///
/// Ids come from [`SequentialIds`] and time from `clock`, so responses are
/// deterministic. Returns the stores too, for assertions on stored state.
pub fn memory_http_state(
    rate_limit: RateLimitConfig,
    clock: Arc<dyn Clock>,
) -> (
    HttpState,
    Arc<InMemorySocialGraph>,
    Arc<InMemoryPostRepository>,
) {
    let graph = Arc::new(InMemorySocialGraph::new());
    let posts = Arc::new(InMemoryPostRepository::new());
    let limiter = Arc::new(RateLimiter::new(rate_limit, clock.clone()));
    let follows = Arc::new(FollowService::new(
        graph.clone(),
        Arc::new(SequentialIds::new("edge")),
        clock.clone(),
    ));
    let state = HttpState::new(
        Arc::new(PostCommandService::new(
            posts.clone(),
            limiter,
            Arc::new(SequentialIds::new("post")),
            clock,
        )),
        follows.clone(),
        follows,
        Arc::new(TimelineService::new(graph.clone(), posts.clone())),
    );
    (state, graph, posts)
}
