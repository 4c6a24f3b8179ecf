//! Domain primitives, services and ports.
//!
//! Purpose: hold the rules of the feed independently of transport and
//! storage. Types are immutable once validated; services depend only on the
//! traits in [`ports`].
//!
//! Public surface:
//! - Post / FollowEdge — validated entities and their error enums.
//! - RateLimiter — per-key fixed-window admission control.
//! - TimelineService — fan-out timeline assembly over the ports.
//! - PostCommandService / FollowService — write-path use cases.
//! - Error (alias to `error::Error`) — transport-agnostic error payload.
//! - ErrorCode (alias to `error::ErrorCode`) — stable error identifier.
//! - TraceId — request-scoped correlation identifier.

pub mod error;
pub mod follow_edge;
pub mod follow_service;
pub mod ports;
pub mod post;
pub mod post_service;
pub mod rate_limiter;
pub mod timeline;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, RETRY_AFTER_DETAIL};
pub use self::follow_edge::{FollowEdge, FollowValidationError, validate_follow_pair};
pub use self::follow_service::FollowService;
pub use self::post::{POST_TEXT_MAX, Post, PostValidationError};
pub use self::post_service::PostCommandService;
pub use self::rate_limiter::{
    Admission, DEFAULT_RATE_LIMIT_MAX_PER_WINDOW, DEFAULT_RATE_LIMIT_WINDOW, RateLimitConfig,
    RateLimiter,
};
pub use self::timeline::{
    DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT, Page, TimelineQuery, TimelineService, feed_order,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use feed_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::rate_limited("slow down"))
/// }
/// # assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
