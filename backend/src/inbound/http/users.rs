//! Per-user read handlers.
//!
//! ```text
//! GET /v1/users/{userID}/tweets?limit=&offset=
//! GET /v1/users/{userID}/following
//! GET /v1/users/{userID}/followers
//! ```

use actix_web::{get, web};

use crate::domain::Post;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    Envelope, ErrorSchema, PostListEnvelopeSchema, UserIdListEnvelopeSchema,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::timeline::PageParams;

/// Posts written by `userID`, newest first.
#[utoipa::path(
    get,
    path = "/v1/users/{userID}/tweets",
    params(("userID" = String, Path, description = "Author id"), PageParams),
    responses(
        (status = 200, description = "Author's posts", body = PostListEnvelopeSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUserPosts"
)]
#[get("/users/{user_id}/tweets")]
pub async fn user_posts(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    params: web::Query<PageParams>,
) -> ApiResult<web::Json<Envelope<Vec<Post>>>> {
    let posts = state
        .timeline
        .posts_by_author(&path.into_inner(), params.to_page())
        .await?;
    Ok(web::Json(Envelope::new(posts)))
}

/// Ids of the users `userID` follows.
#[utoipa::path(
    get,
    path = "/v1/users/{userID}/following",
    params(("userID" = String, Path, description = "Follower id")),
    responses(
        (status = 200, description = "Followed user ids", body = UserIdListEnvelopeSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listFollowing"
)]
#[get("/users/{user_id}/following")]
pub async fn following(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Envelope<Vec<String>>>> {
    let ids = state.graph.following(&path.into_inner()).await?;
    Ok(web::Json(Envelope::new(ids)))
}

/// Ids of the users following `userID`.
#[utoipa::path(
    get,
    path = "/v1/users/{userID}/followers",
    params(("userID" = String, Path, description = "Followee id")),
    responses(
        (status = 200, description = "Follower ids", body = UserIdListEnvelopeSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listFollowers"
)]
#[get("/users/{user_id}/followers")]
pub async fn followers(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Envelope<Vec<String>>>> {
    let ids = state.graph.followers(&path.into_inner()).await?;
    Ok(web::Json(Envelope::new(ids)))
}
