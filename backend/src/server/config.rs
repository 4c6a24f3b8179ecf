//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use feed_backend::domain::RateLimitConfig;
use feed_backend::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) rate_limit: RateLimitConfig,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Configuration backed by the in-memory stores.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, rate_limit: RateLimitConfig) -> Self {
        Self {
            bind_addr,
            rate_limit,
            db_pool: None,
        }
    }

    /// Attach a database pool; the PostgreSQL adapters replace the in-memory
    /// stores.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
