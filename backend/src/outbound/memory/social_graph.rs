//! In-memory follower graph.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::FollowEdge;
use crate::domain::ports::{SocialGraphRepository, SocialGraphRepositoryError};

use super::{read, write};

/// Follow edges keyed by `(follower_id, followee_id)`.
///
/// The ordered map keeps adjacency reads deterministic.
#[derive(Debug, Default)]
pub struct InMemorySocialGraph {
    edges: RwLock<BTreeMap<(String, String), FollowEdge>>,
}

impl InMemorySocialGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored edges.
    pub fn edge_count(&self) -> usize {
        read(&self.edges).len()
    }
}

#[async_trait]
impl SocialGraphRepository for InMemorySocialGraph {
    async fn create_edge(&self, edge: &FollowEdge) -> Result<(), SocialGraphRepositoryError> {
        write(&self.edges)
            .entry((edge.follower_id().to_owned(), edge.followee_id().to_owned()))
            .or_insert_with(|| edge.clone());
        Ok(())
    }

    async fn remove_edge(
        &self,
        follower_id: &str,
        followee_id: &str,
    ) -> Result<(), SocialGraphRepositoryError> {
        write(&self.edges).remove(&(follower_id.to_owned(), followee_id.to_owned()));
        Ok(())
    }

    async fn following_ids(
        &self,
        follower_id: &str,
    ) -> Result<Vec<String>, SocialGraphRepositoryError> {
        Ok(read(&self.edges)
            .keys()
            .filter(|(follower, _)| follower == follower_id)
            .map(|(_, followee)| followee.clone())
            .collect())
    }

    async fn follower_ids(
        &self,
        followee_id: &str,
    ) -> Result<Vec<String>, SocialGraphRepositoryError> {
        Ok(read(&self.edges)
            .keys()
            .filter(|(_, followee)| followee == followee_id)
            .map(|(follower, _)| follower.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn edge(id: &str, follower: &str, followee: &str) -> FollowEdge {
        FollowEdge::new(id, follower, followee, 1).expect("valid edge")
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_follow_keeps_first_edge() {
        let graph = InMemorySocialGraph::new();
        graph.create_edge(&edge("f1", "u1", "u2")).await.expect("first");
        graph
            .create_edge(&edge("f2", "u1", "u2"))
            .await
            .expect("duplicate is a no-op");

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(
            graph.following_ids("u1").await.expect("following"),
            ["u2"]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn removing_absent_edge_succeeds() {
        let graph = InMemorySocialGraph::new();
        graph
            .remove_edge("u1", "u2")
            .await
            .expect("absent edge removal is a no-op");
        assert_eq!(graph.edge_count(), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn adjacency_works_in_both_directions() {
        let graph = InMemorySocialGraph::new();
        for (id, follower, followee) in [("f1", "u1", "u2"), ("f2", "u1", "u3"), ("f3", "u3", "u2")]
        {
            graph
                .create_edge(&edge(id, follower, followee))
                .await
                .expect("store edge");
        }

        assert_eq!(
            graph.following_ids("u1").await.expect("following"),
            ["u2", "u3"]
        );
        assert_eq!(
            graph.follower_ids("u2").await.expect("followers"),
            ["u1", "u3"]
        );

        graph.remove_edge("u1", "u2").await.expect("unfollow");
        assert_eq!(
            graph.follower_ids("u2").await.expect("followers"),
            ["u3"]
        );
    }
}
