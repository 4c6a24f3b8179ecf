//! Driving port for the post write path.
//!
//! Inbound adapters hand over the raw author id and text; admission control,
//! validation and persistence all happen behind this port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, Post};

/// Request to publish a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePostRequest {
    /// Author of the post; also the rate-limit key.
    pub author_id: String,
    /// Message body, validated against the post length limits.
    pub text: String,
}

/// Driving port for publishing posts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostCommand: Send + Sync {
    /// Publish a post and return the stored value.
    ///
    /// # Errors
    ///
    /// - [`crate::domain::ErrorCode::RateLimited`] when the author exhausted
    ///   the current window. Nothing is validated or stored.
    /// - [`crate::domain::ErrorCode::ValidationFailed`] when the post breaks
    ///   a domain invariant. Nothing is stored.
    /// - Service unavailable or internal errors from the post store.
    async fn create_post(&self, request: CreatePostRequest) -> Result<Post, Error>;
}
