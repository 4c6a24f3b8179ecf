//! In-memory post store.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{PostRepository, PostRepositoryError};
use crate::domain::{Page, Post, feed_order};

use super::{read, write};

/// Posts grouped by author.
#[derive(Debug, Default)]
pub struct InMemoryPostRepository {
    by_author: RwLock<HashMap<String, Vec<Post>>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored posts.
    pub fn len(&self) -> usize {
        read(&self.by_author).values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, post: &Post) -> Result<(), PostRepositoryError> {
        write(&self.by_author)
            .entry(post.author_id().to_owned())
            .or_default()
            .push(post.clone());
        Ok(())
    }

    async fn timeline_for_authors(
        &self,
        author_ids: &[String],
        page: Page,
    ) -> Result<Vec<Post>, PostRepositoryError> {
        let authors: HashSet<&str> = author_ids.iter().map(String::as_str).collect();
        let mut merged: Vec<Post> = {
            let store = read(&self.by_author);
            authors
                .iter()
                .filter_map(|author| store.get(*author))
                .flatten()
                .cloned()
                .collect()
        };
        merged.sort_by(feed_order);
        Ok(page.slice(merged))
    }

    async fn by_author(
        &self,
        author_id: &str,
        page: Page,
    ) -> Result<Vec<Post>, PostRepositoryError> {
        let mut posts = read(&self.by_author)
            .get(author_id)
            .cloned()
            .unwrap_or_default();
        posts.sort_by(feed_order);
        Ok(page.slice(posts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn post(id: &str, author: &str, created_at: i64) -> Post {
        Post::new(id, author, "text", created_at).expect("valid post")
    }

    #[fixture]
    async fn seeded() -> InMemoryPostRepository {
        let repo = InMemoryPostRepository::new();
        for p in [
            post("a1", "alice", 10),
            post("b1", "bob", 20),
            post("a2", "alice", 30),
            post("c1", "carol", 25),
            post("b0", "bob", 30),
        ] {
            repo.create(&p).await.expect("store post");
        }
        repo
    }

    fn ids(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(Post::id).collect()
    }

    #[rstest]
    #[tokio::test]
    async fn merges_authors_newest_first_with_id_tiebreak(
        #[future] seeded: InMemoryPostRepository,
    ) {
        let repo = seeded.await;
        let authors = ["alice".to_owned(), "bob".to_owned()];
        let posts = repo
            .timeline_for_authors(&authors, Page::default())
            .await
            .expect("timeline");
        assert_eq!(ids(&posts), ["a2", "b0", "b1", "a1"]);
    }

    #[rstest]
    #[tokio::test]
    async fn paginates_after_merge(#[future] seeded: InMemoryPostRepository) {
        let repo = seeded.await;
        let authors = ["alice".to_owned(), "bob".to_owned(), "carol".to_owned()];
        let posts = repo
            .timeline_for_authors(&authors, Page::new(Some(2), Some(1)))
            .await
            .expect("timeline");
        assert_eq!(ids(&posts), ["b0", "c1"]);
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_author_ids_do_not_duplicate_posts(
        #[future] seeded: InMemoryPostRepository,
    ) {
        let repo = seeded.await;
        let authors = ["carol".to_owned(), "carol".to_owned()];
        let posts = repo
            .timeline_for_authors(&authors, Page::default())
            .await
            .expect("timeline");
        assert_eq!(ids(&posts), ["c1"]);
    }

    #[rstest]
    #[tokio::test]
    async fn by_author_returns_only_that_author(#[future] seeded: InMemoryPostRepository) {
        let repo = seeded.await;
        let posts = repo
            .by_author("alice", Page::default())
            .await
            .expect("author feed");
        assert_eq!(ids(&posts), ["a2", "a1"]);
        assert_eq!(repo.len(), 5);
    }
}
