//! Driving port for follow and unfollow.

use async_trait::async_trait;

use crate::domain::{Error, FollowEdge};

/// Driving port for mutating the follower graph.
///
/// Both operations are idempotent: following twice returns an edge each time
/// and leaves one edge stored, unfollowing an absent edge succeeds.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FollowCommand: Send + Sync {
    /// Make `follower_id` follow `followee_id`.
    async fn follow(&self, follower_id: &str, followee_id: &str) -> Result<FollowEdge, Error>;

    /// Remove the edge from `follower_id` to `followee_id`.
    async fn unfollow(&self, follower_id: &str, followee_id: &str) -> Result<(), Error>;
}
