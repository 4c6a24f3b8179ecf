//! Follow edge data model.
//!
//! A [`FollowEdge`] records that one user follows another. The pair
//! `(follower_id, followee_id)` is the natural key; storage adapters treat a
//! duplicate pair as already present rather than as a conflict.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned by [`FollowEdge::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowValidationError {
    EmptyFollowerId,
    EmptyFolloweeId,
    SelfFollow,
}

impl fmt::Display for FollowValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyFollowerId => write!(f, "follower_id required"),
            Self::EmptyFolloweeId => write!(f, "followee_id required"),
            Self::SelfFollow => write!(f, "cannot follow self"),
        }
    }
}

impl std::error::Error for FollowValidationError {}

/// Check the follower/followee pair without building an edge.
///
/// Shared by [`FollowEdge::new`] and by callers that only hold the pair, such
/// as unfollow requests.
pub fn validate_follow_pair(
    follower_id: &str,
    followee_id: &str,
) -> Result<(), FollowValidationError> {
    if follower_id.is_empty() {
        return Err(FollowValidationError::EmptyFollowerId);
    }
    if followee_id.is_empty() {
        return Err(FollowValidationError::EmptyFolloweeId);
    }
    if follower_id == followee_id {
        return Err(FollowValidationError::SelfFollow);
    }
    Ok(())
}

/// Directed "follows" relation between two users.
///
/// ## Invariants
/// - `follower_id` and `followee_id` are non-empty.
/// - `follower_id != followee_id`.
///
/// # Examples
/// ```
/// use feed_backend::domain::FollowEdge;
///
/// let edge = FollowEdge::new("f1", "u1", "u2", 42).expect("valid edge");
/// assert_eq!(edge.followee_id(), "u2");
/// assert!(FollowEdge::new("f2", "u1", "u1", 42).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FollowEdgeDto", into = "FollowEdgeDto")]
pub struct FollowEdge {
    id: String,
    follower_id: String,
    followee_id: String,
    created_at: i64,
}

impl FollowEdge {
    /// Validate the pair and build an edge. Pure.
    pub fn new(
        id: impl Into<String>,
        follower_id: impl Into<String>,
        followee_id: impl Into<String>,
        created_at: i64,
    ) -> Result<Self, FollowValidationError> {
        let follower_id = follower_id.into();
        let followee_id = followee_id.into();
        validate_follow_pair(&follower_id, &followee_id)?;
        Ok(Self {
            id: id.into(),
            follower_id,
            followee_id,
            created_at,
        })
    }

    /// Opaque edge identifier.
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// The user doing the following.
    pub fn follower_id(&self) -> &str {
        self.follower_id.as_str()
    }

    /// The user being followed.
    pub fn followee_id(&self) -> &str {
        self.followee_id.as_str()
    }

    /// Creation time in epoch seconds.
    pub fn created_at(&self) -> i64 {
        self.created_at
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FollowEdgeDto {
    id: String,
    follower_id: String,
    followee_id: String,
    created_at: i64,
}

impl From<FollowEdge> for FollowEdgeDto {
    fn from(value: FollowEdge) -> Self {
        let FollowEdge {
            id,
            follower_id,
            followee_id,
            created_at,
        } = value;
        Self {
            id,
            follower_id,
            followee_id,
            created_at,
        }
    }
}

impl TryFrom<FollowEdgeDto> for FollowEdge {
    type Error = FollowValidationError;

    fn try_from(value: FollowEdgeDto) -> Result<Self, Self::Error> {
        FollowEdge::new(
            value.id,
            value.follower_id,
            value.followee_id,
            value.created_at,
        )
    }
}
