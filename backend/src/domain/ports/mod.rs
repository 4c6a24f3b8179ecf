//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports ([`PostRepository`], [`SocialGraphRepository`],
//! [`IdGenerator`]) are implemented by outbound adapters. Driving ports
//! ([`PostCommand`], [`FollowCommand`], [`TimelineQueryPort`],
//! [`SocialGraphQuery`]) are implemented by domain services and consumed by
//! inbound adapters.

mod macros;
pub(crate) use macros::define_store_error;

mod follow_command;
mod id_generator;
mod post_command;
mod post_repository;
mod social_graph_query;
mod social_graph_repository;
mod timeline_query;

#[cfg(test)]
pub use follow_command::MockFollowCommand;
pub use follow_command::FollowCommand;
#[cfg(test)]
pub use id_generator::MockIdGenerator;
pub use id_generator::IdGenerator;
#[cfg(test)]
pub use post_command::MockPostCommand;
pub use post_command::{CreatePostRequest, PostCommand};
#[cfg(test)]
pub use post_repository::MockPostRepository;
pub use post_repository::{PostRepository, PostRepositoryError};
#[cfg(test)]
pub use social_graph_query::MockSocialGraphQuery;
pub use social_graph_query::SocialGraphQuery;
#[cfg(test)]
pub use social_graph_repository::MockSocialGraphRepository;
pub use social_graph_repository::{SocialGraphRepository, SocialGraphRepositoryError};
#[cfg(test)]
pub use timeline_query::MockTimelineQueryPort;
pub use timeline_query::TimelineQueryPort;
