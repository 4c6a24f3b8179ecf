//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer together
//! with the schema wrappers in [`crate::inbound::http::schemas`], so domain
//! types never depend on utoipa.
//!
//! The document backs Swagger UI in debug builds and is exported by
//! `cargo run --bin openapi-dump`.

use crate::inbound::http::follows::FollowBody;
use crate::inbound::http::posts::CreatePostBody;
use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, FollowEdgeEnvelopeSchema, FollowEdgeSchema,
    PostEnvelopeSchema, PostListEnvelopeSchema, PostSchema, UserIdListEnvelopeSchema,
};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Feed backend API",
        description = "Posting, following and home timelines with per-author rate limiting."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::posts::create_post,
        crate::inbound::http::timeline::timeline,
        crate::inbound::http::follows::follow,
        crate::inbound::http::follows::unfollow,
        crate::inbound::http::users::user_posts,
        crate::inbound::http::users::following,
        crate::inbound::http::users::followers,
        crate::inbound::http::health::healthz,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CreatePostBody,
        FollowBody,
        PostSchema,
        FollowEdgeSchema,
        PostEnvelopeSchema,
        PostListEnvelopeSchema,
        FollowEdgeEnvelopeSchema,
        UserIdListEnvelopeSchema,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "posts", description = "Publishing posts"),
        (name = "timeline", description = "Home timelines"),
        (name = "follows", description = "Managing follow edges"),
        (name = "users", description = "Per-user posts and relations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
