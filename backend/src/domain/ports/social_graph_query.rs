//! Driving port for reading the follower graph.

use async_trait::async_trait;

use crate::domain::Error;

/// Read-only view over follow edges for inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SocialGraphQuery: Send + Sync {
    /// Ids of the users `user_id` follows.
    async fn following(&self, user_id: &str) -> Result<Vec<String>, Error>;

    /// Ids of the users following `user_id`.
    async fn followers(&self, user_id: &str) -> Result<Vec<String>, Error>;
}
