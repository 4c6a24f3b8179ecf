//! Post write-path service.
//!
//! Order matters: admission control runs first, so a denied request is
//! neither validated nor stored. Validation runs before persistence, so an
//! invalid post never reaches the repository.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{CreatePostRequest, IdGenerator, PostCommand, PostRepository};
use crate::domain::{Admission, Error, Post, RateLimiter};

/// Service implementing [`PostCommand`].
#[derive(Clone)]
pub struct PostCommandService<P: ?Sized> {
    posts: Arc<P>,
    limiter: Arc<RateLimiter>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl<P: ?Sized> PostCommandService<P> {
    pub fn new(
        posts: Arc<P>,
        limiter: Arc<RateLimiter>,
        ids: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            posts,
            limiter,
            ids,
            clock,
        }
    }
}

#[async_trait]
impl<P> PostCommand for PostCommandService<P>
where
    P: PostRepository + ?Sized,
{
    async fn create_post(&self, request: CreatePostRequest) -> Result<Post, Error> {
        if let Admission::Denied { retry_after } = self.limiter.check(&request.author_id) {
            debug!(author = %request.author_id, ?retry_after, "post rejected by rate limiter");
            return Err(Error::rate_limited_for(retry_after));
        }

        let post = Post::new(
            self.ids.next_id(),
            request.author_id,
            request.text,
            self.clock.utc().timestamp(),
        )?;

        self.posts.create(&post).await?;
        info!(post_id = post.id(), author = post.author_id(), "post created");
        Ok(post)
    }
}
