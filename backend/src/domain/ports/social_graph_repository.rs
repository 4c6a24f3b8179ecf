//! Port for the follower graph.
//!
//! Edges are keyed by `(follower_id, followee_id)`. Creating an edge that
//! already exists and removing one that does not are both successful no-ops,
//! so callers may retry either operation freely.

use async_trait::async_trait;

use crate::domain::FollowEdge;

use super::define_store_error;

define_store_error! {
    /// Errors raised by social graph adapters.
    pub enum SocialGraphRepositoryError for "social graph";
}

/// Port for storing and traversing follow edges.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SocialGraphRepository: Send + Sync {
    /// Record `edge`. A duplicate pair leaves the stored edge untouched.
    async fn create_edge(&self, edge: &FollowEdge) -> Result<(), SocialGraphRepositoryError>;

    /// Delete the edge for the pair if present.
    async fn remove_edge(
        &self,
        follower_id: &str,
        followee_id: &str,
    ) -> Result<(), SocialGraphRepositoryError>;

    /// Users that `follower_id` follows.
    async fn following_ids(
        &self,
        follower_id: &str,
    ) -> Result<Vec<String>, SocialGraphRepositoryError>;

    /// Users following `followee_id`.
    async fn follower_ids(
        &self,
        followee_id: &str,
    ) -> Result<Vec<String>, SocialGraphRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_error_mentions_cause() {
        let error = SocialGraphRepositoryError::connection("pool timed out");
        assert_eq!(
            error.to_string(),
            "social graph connection failed: pool timed out"
        );
    }
}
