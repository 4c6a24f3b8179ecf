//! Post publishing handler.
//!
//! ```text
//! POST /v1/tweets {"user_id": "...", "text": "..."}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::CreatePostRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{Envelope, ErrorSchema, PostEnvelopeSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require};

const USER_ID: FieldName = FieldName::new("user_id");
const TEXT: FieldName = FieldName::new("text");

/// Request payload for publishing a post.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreatePostBody {
    #[schema(example = "u1")]
    pub user_id: Option<String>,
    #[schema(example = "hola")]
    pub text: Option<String>,
}

fn parse_create_post(body: CreatePostBody) -> ApiResult<CreatePostRequest> {
    Ok(CreatePostRequest {
        author_id: require(body.user_id, USER_ID)?,
        text: require(body.text, TEXT)?,
    })
}

/// Publish a post for `user_id`.
#[utoipa::path(
    post,
    path = "/v1/tweets",
    request_body = CreatePostBody,
    responses(
        (status = 201, description = "Post created", body = PostEnvelopeSchema),
        (status = 400, description = "Malformed payload", body = ErrorSchema),
        (status = 422, description = "Post failed validation", body = ErrorSchema),
        (
            status = 429,
            description = "Author is rate limited",
            headers(("Retry-After" = u64, description = "Seconds until the window resets")),
            body = ErrorSchema
        ),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["posts"],
    operation_id = "createPost"
)]
#[post("/tweets")]
pub async fn create_post(
    state: web::Data<HttpState>,
    payload: web::Json<CreatePostBody>,
) -> ApiResult<HttpResponse> {
    let request = parse_create_post(payload.into_inner())?;
    let post = state.posts.create_post(request).await?;
    Ok(HttpResponse::Created().json(Envelope::new(post)))
}
