//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{FollowCommand, PostCommand, SocialGraphQuery, TimelineQueryPort};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub posts: Arc<dyn PostCommand>,
    pub follows: Arc<dyn FollowCommand>,
    pub graph: Arc<dyn SocialGraphQuery>,
    pub timeline: Arc<dyn TimelineQueryPort>,
}

impl HttpState {
    pub fn new(
        posts: Arc<dyn PostCommand>,
        follows: Arc<dyn FollowCommand>,
        graph: Arc<dyn SocialGraphQuery>,
        timeline: Arc<dyn TimelineQueryPort>,
    ) -> Self {
        Self {
            posts,
            follows,
            graph,
            timeline,
        }
    }
}
