//! Builders wiring storage adapters into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::info;

use feed_backend::domain::ports::{IdGenerator, PostRepository, SocialGraphRepository};
use feed_backend::domain::{
    FollowService, PostCommandService, RateLimitConfig, RateLimiter, TimelineService,
};
use feed_backend::inbound::http::state::HttpState;
use feed_backend::outbound::id::UuidV7IdGenerator;
use feed_backend::outbound::memory::{InMemoryPostRepository, InMemorySocialGraph};
use feed_backend::outbound::persistence::{DieselPostRepository, DieselSocialGraphRepository};

use super::ServerConfig;

/// Build the HTTP state over PostgreSQL when a pool is configured, otherwise
/// over the in-memory stores.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => {
            info!(store = "postgres", "storage selected");
            build_services(
                Arc::new(DieselSocialGraphRepository::new(pool.clone())),
                Arc::new(DieselPostRepository::new(pool.clone())),
                config.rate_limit,
            )
        }
        None => {
            info!(store = "memory", "storage selected");
            build_services(
                Arc::new(InMemorySocialGraph::new()),
                Arc::new(InMemoryPostRepository::new()),
                config.rate_limit,
            )
        }
    };
    web::Data::new(state)
}

/// Assemble every driving port over one graph store and one post store.
///
/// A single limiter instance is shared by all workers so the budget is
/// per process, not per worker thread.
fn build_services<G, P>(graph: Arc<G>, posts: Arc<P>, rate_limit: RateLimitConfig) -> HttpState
where
    G: SocialGraphRepository + 'static,
    P: PostRepository + 'static,
{
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let ids: Arc<dyn IdGenerator> = Arc::new(UuidV7IdGenerator);
    let limiter = Arc::new(RateLimiter::new(rate_limit, clock.clone()));
    info!(
        enabled = rate_limit.enabled,
        window_secs = rate_limit.window.as_secs(),
        max_per_window = rate_limit.max_per_window,
        "rate limiter configured"
    );

    let follows = Arc::new(FollowService::new(graph.clone(), ids.clone(), clock.clone()));
    HttpState::new(
        Arc::new(PostCommandService::new(posts.clone(), limiter, ids, clock)),
        follows.clone(),
        follows,
        Arc::new(TimelineService::new(graph, posts)),
    )
}
