//! Timeline assembly.
//!
//! A home timeline is a fan-out read: resolve whom the subject follows, then
//! merge every followee's posts into one sequence ordered newest first, and
//! only then cut the requested page. Equal timestamps are ordered by post id
//! ascending so pages are stable across calls.

use std::cmp::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{PostRepository, SocialGraphRepository, TimelineQueryPort};
use crate::domain::{Error, Post};

/// Page size used when the caller gives none or a non-positive one.
pub const DEFAULT_PAGE_LIMIT: usize = 50;
/// Largest page a caller may request.
pub const MAX_PAGE_LIMIT: usize = 200;

/// Normalised pagination window.
///
/// ## Invariants
/// - `1 <= limit <= MAX_PAGE_LIMIT`.
///
/// # Examples
/// ```
/// use feed_backend::domain::Page;
///
/// assert_eq!(Page::new(Some(0), None).limit(), 50);
/// assert_eq!(Page::new(Some(500), Some(-3)).limit(), 200);
/// assert_eq!(Page::new(Some(500), Some(-3)).offset(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    limit: usize,
    offset: usize,
}

impl Page {
    /// Clamp raw caller input into a valid page.
    ///
    /// Absent or non-positive limits become [`DEFAULT_PAGE_LIMIT`]; limits
    /// above [`MAX_PAGE_LIMIT`] are capped. Absent or negative offsets
    /// become zero.
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        let limit = limit
            .and_then(|value| usize::try_from(value).ok())
            .filter(|value| *value > 0)
            .map_or(DEFAULT_PAGE_LIMIT, |value| value.min(MAX_PAGE_LIMIT));
        let offset = offset
            .and_then(|value| usize::try_from(value).ok())
            .unwrap_or(0);
        Self { limit, offset }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Cut this page out of an already ordered sequence.
    pub fn slice<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset)
            .take(self.limit)
            .collect()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Feed ordering: newest first, then id ascending.
pub fn feed_order(left: &Post, right: &Post) -> Ordering {
    right
        .created_at()
        .cmp(&left.created_at())
        .then_with(|| left.id().cmp(right.id()))
}

/// A home timeline request for one subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineQuery {
    subject_user_id: String,
    page: Page,
}

impl TimelineQuery {
    pub fn new(subject_user_id: impl Into<String>, page: Page) -> Self {
        Self {
            subject_user_id: subject_user_id.into(),
            page,
        }
    }

    pub fn subject_user_id(&self) -> &str {
        self.subject_user_id.as_str()
    }

    pub fn page(&self) -> Page {
        self.page
    }
}

/// Timeline assembler implementing [`TimelineQueryPort`].
#[derive(Clone)]
pub struct TimelineService<G: ?Sized, P: ?Sized> {
    graph: Arc<G>,
    posts: Arc<P>,
}

impl<G: ?Sized, P: ?Sized> TimelineService<G, P> {
    /// Create a new service over the given graph and post stores.
    pub fn new(graph: Arc<G>, posts: Arc<P>) -> Self {
        Self { graph, posts }
    }
}

#[async_trait]
impl<G, P> TimelineQueryPort for TimelineService<G, P>
where
    G: SocialGraphRepository + ?Sized,
    P: PostRepository + ?Sized,
{
    async fn timeline(&self, query: &TimelineQuery) -> Result<Vec<Post>, Error> {
        let followee_ids = self
            .graph
            .following_ids(query.subject_user_id())
            .await?;
        if followee_ids.is_empty() {
            debug!(subject = query.subject_user_id(), "timeline has no followees");
            return Ok(Vec::new());
        }

        let posts = self
            .posts
            .timeline_for_authors(&followee_ids, query.page())
            .await?;
        debug!(
            subject = query.subject_user_id(),
            followees = followee_ids.len(),
            returned = posts.len(),
            "timeline assembled"
        );
        Ok(posts)
    }

    async fn posts_by_author(&self, author_id: &str, page: Page) -> Result<Vec<Post>, Error> {
        self.posts
            .by_author(author_id, page)
            .await
            .map_err(Error::from)
    }
}

#[cfg(test)]
#[path = "timeline_tests.rs"]
mod tests;
