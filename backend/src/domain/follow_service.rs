//! Follow graph service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{FollowCommand, IdGenerator, SocialGraphQuery, SocialGraphRepository};
use crate::domain::{Error, FollowEdge, validate_follow_pair};

/// Service implementing [`FollowCommand`] and [`SocialGraphQuery`].
#[derive(Clone)]
pub struct FollowService<G: ?Sized> {
    graph: Arc<G>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl<G: ?Sized> FollowService<G> {
    pub fn new(graph: Arc<G>, ids: Arc<dyn IdGenerator>, clock: Arc<dyn Clock>) -> Self {
        Self { graph, ids, clock }
    }
}

#[async_trait]
impl<G> FollowCommand for FollowService<G>
where
    G: SocialGraphRepository + ?Sized,
{
    async fn follow(&self, follower_id: &str, followee_id: &str) -> Result<FollowEdge, Error> {
        let edge = FollowEdge::new(
            self.ids.next_id(),
            follower_id,
            followee_id,
            self.clock.utc().timestamp(),
        )?;

        self.graph.create_edge(&edge).await?;
        info!(follower = follower_id, followee = followee_id, "follow recorded");
        Ok(edge)
    }

    async fn unfollow(&self, follower_id: &str, followee_id: &str) -> Result<(), Error> {
        validate_follow_pair(follower_id, followee_id)?;

        self.graph.remove_edge(follower_id, followee_id).await?;
        info!(follower = follower_id, followee = followee_id, "follow removed");
        Ok(())
    }
}

#[async_trait]
impl<G> SocialGraphQuery for FollowService<G>
where
    G: SocialGraphRepository + ?Sized,
{
    async fn following(&self, user_id: &str) -> Result<Vec<String>, Error> {
        self.graph
            .following_ids(user_id)
            .await
            .map_err(Error::from)
    }

    async fn followers(&self, user_id: &str) -> Result<Vec<String>, Error> {
        self.graph
            .follower_ids(user_id)
            .await
            .map_err(Error::from)
    }
}
