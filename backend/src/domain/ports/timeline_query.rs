//! Driving port for feed reads.

use async_trait::async_trait;

use crate::domain::{Error, Page, Post, TimelineQuery};

/// Read side of the feed: a user's home timeline and an author's own posts.
///
/// Both return a possibly empty sequence, never an absent value.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TimelineQueryPort: Send + Sync {
    /// Posts from every account the subject follows, newest first.
    async fn timeline(&self, query: &TimelineQuery) -> Result<Vec<Post>, Error>;

    /// Posts written by `author_id`, newest first.
    async fn posts_by_author(&self, author_id: &str, page: Page) -> Result<Vec<Post>, Error>;
}
