//! Port for post persistence.
//!
//! The timeline read is expressed as a single fan-in query over a set of
//! authors so adapters can push the merge, ordering and pagination down to
//! storage. Adapters must order results by `created_at` descending and break
//! ties by post id ascending, and apply the page only after that ordering.

use async_trait::async_trait;

use crate::domain::{Page, Post};

use super::define_store_error;

define_store_error! {
    /// Errors raised by post repository adapters.
    pub enum PostRepositoryError for "post repository";
}

/// Port for storing posts and reading them back in feed order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Persist a validated post.
    async fn create(&self, post: &Post) -> Result<(), PostRepositoryError>;

    /// Posts written by any of `author_ids`, newest first, paginated after
    /// the merge.
    ///
    /// An empty author list yields an empty page.
    async fn timeline_for_authors(
        &self,
        author_ids: &[String],
        page: Page,
    ) -> Result<Vec<Post>, PostRepositoryError>;

    /// Posts written by a single author, newest first.
    async fn by_author(
        &self,
        author_id: &str,
        page: Page,
    ) -> Result<Vec<Post>, PostRepositoryError>;
}
