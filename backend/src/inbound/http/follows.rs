//! Follow and unfollow handlers.
//!
//! ```text
//! POST   /v1/follows {"follower_id": "...", "followee_id": "..."}
//! DELETE /v1/follows {"follower_id": "...", "followee_id": "..."}
//! ```

use actix_web::{HttpResponse, delete, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{Envelope, ErrorSchema, FollowEdgeEnvelopeSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require};

const FOLLOWER_ID: FieldName = FieldName::new("follower_id");
const FOLLOWEE_ID: FieldName = FieldName::new("followee_id");

/// Request payload naming a follower/followee pair.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct FollowBody {
    #[schema(example = "u1")]
    pub follower_id: Option<String>,
    #[schema(example = "u2")]
    pub followee_id: Option<String>,
}

impl FollowBody {
    fn into_pair(self) -> ApiResult<(String, String)> {
        Ok((
            require(self.follower_id, FOLLOWER_ID)?,
            require(self.followee_id, FOLLOWEE_ID)?,
        ))
    }
}

/// Follow a user. Following an already-followed user also returns 201.
#[utoipa::path(
    post,
    path = "/v1/follows",
    request_body = FollowBody,
    responses(
        (status = 201, description = "Edge stored", body = FollowEdgeEnvelopeSchema),
        (status = 400, description = "Malformed payload", body = ErrorSchema),
        (status = 422, description = "Invalid pair", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["follows"],
    operation_id = "follow"
)]
#[post("/follows")]
pub async fn follow(
    state: web::Data<HttpState>,
    payload: web::Json<FollowBody>,
) -> ApiResult<HttpResponse> {
    let (follower_id, followee_id) = payload.into_inner().into_pair()?;
    let edge = state.follows.follow(&follower_id, &followee_id).await?;
    Ok(HttpResponse::Created().json(Envelope::new(edge)))
}

/// Unfollow a user. Removing an absent edge also returns 204.
#[utoipa::path(
    delete,
    path = "/v1/follows",
    request_body = FollowBody,
    responses(
        (status = 204, description = "Edge absent"),
        (status = 400, description = "Malformed payload", body = ErrorSchema),
        (status = 422, description = "Invalid pair", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["follows"],
    operation_id = "unfollow"
)]
#[delete("/follows")]
pub async fn unfollow(
    state: web::Data<HttpState>,
    payload: web::Json<FollowBody>,
) -> ApiResult<HttpResponse> {
    let (follower_id, followee_id) = payload.into_inner().into_pair()?;
    state.follows.unfollow(&follower_id, &followee_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
