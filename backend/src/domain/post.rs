//! Post data model.
//!
//! A [`Post`] is a short message written by one author. Posts are immutable
//! once constructed; the only way to obtain one is through [`Post::new`] (or
//! deserialisation, which funnels through the same checks), so every value in
//! the system satisfies the length and author invariants below.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum post length in Unicode scalar values.
pub const POST_TEXT_MAX: usize = 280;

/// Validation errors returned by [`Post::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostValidationError {
    EmptyAuthorId,
    EmptyText,
    TextTooLong { max: usize, actual: usize },
}

impl fmt::Display for PostValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyAuthorId => write!(f, "user_id required"),
            Self::EmptyText => write!(f, "text must not be empty"),
            Self::TextTooLong { max, actual } => {
                write!(f, "text must be at most {max} characters (got {actual})")
            }
        }
    }
}

impl std::error::Error for PostValidationError {}

/// A short message authored by a user.
///
/// ## Invariants
/// - `author_id` is non-empty.
/// - `text` holds between 1 and [`POST_TEXT_MAX`] characters.
///
/// Serialised as `{"id", "user_id", "text", "created_at"}` with `created_at`
/// in epoch seconds.
///
/// # Examples
/// ```
/// use feed_backend::domain::Post;
///
/// let post = Post::new("p1", "u1", "hello", 1_700_000_000).expect("valid post");
/// assert_eq!(post.author_id(), "u1");
/// assert!(Post::new("p2", "u1", "", 1).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PostDto", into = "PostDto")]
pub struct Post {
    id: String,
    author_id: String,
    text: String,
    created_at: i64,
}

impl Post {
    /// Validate the inputs and build a post.
    ///
    /// Pure: no side effects, deterministic for the same inputs. The
    /// identifier is opaque and is not inspected.
    pub fn new(
        id: impl Into<String>,
        author_id: impl Into<String>,
        text: impl Into<String>,
        created_at: i64,
    ) -> Result<Self, PostValidationError> {
        let author_id = author_id.into();
        if author_id.is_empty() {
            return Err(PostValidationError::EmptyAuthorId);
        }

        let text = text.into();
        let length = text.chars().count();
        if length == 0 {
            return Err(PostValidationError::EmptyText);
        }
        if length > POST_TEXT_MAX {
            return Err(PostValidationError::TextTooLong {
                max: POST_TEXT_MAX,
                actual: length,
            });
        }

        Ok(Self {
            id: id.into(),
            author_id,
            text,
            created_at,
        })
    }

    /// Opaque post identifier.
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Identifier of the authoring user.
    pub fn author_id(&self) -> &str {
        self.author_id.as_str()
    }

    /// Message body.
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Creation time in epoch seconds.
    pub fn created_at(&self) -> i64 {
        self.created_at
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PostDto {
    id: String,
    user_id: String,
    text: String,
    created_at: i64,
}

impl From<Post> for PostDto {
    fn from(value: Post) -> Self {
        let Post {
            id,
            author_id,
            text,
            created_at,
        } = value;
        Self {
            id,
            user_id: author_id,
            text,
            created_at,
        }
    }
}

impl TryFrom<PostDto> for Post {
    type Error = PostValidationError;

    fn try_from(value: PostDto) -> Result<Self, Self::Error> {
        Post::new(value.id, value.user_id, value.text, value.created_at)
    }
}
