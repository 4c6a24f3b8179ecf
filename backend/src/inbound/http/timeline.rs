//! Home timeline handler.
//!
//! ```text
//! GET /v1/timeline/{userID}?limit=50&offset=0
//! ```

use actix_web::{get, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::{Page, Post, TimelineQuery};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{Envelope, ErrorSchema, PostListEnvelopeSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::lenient_i64;

/// Pagination query parameters.
///
/// Values are taken as strings so that non-numeric input falls back to the
/// defaults instead of failing the request.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Page size; defaults to 50, capped at 200.
    #[param(value_type = Option<i64>, example = 50)]
    pub limit: Option<String>,
    /// Posts to skip; negative values count as 0.
    #[param(value_type = Option<i64>, example = 0)]
    pub offset: Option<String>,
}

impl PageParams {
    pub fn to_page(&self) -> Page {
        Page::new(
            lenient_i64(self.limit.as_deref()),
            lenient_i64(self.offset.as_deref()),
        )
    }
}

/// Posts from every account `userID` follows, newest first.
#[utoipa::path(
    get,
    path = "/v1/timeline/{userID}",
    params(
        ("userID" = String, Path, description = "Subject user id"),
        PageParams
    ),
    responses(
        (status = 200, description = "Timeline page", body = PostListEnvelopeSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["timeline"],
    operation_id = "getTimeline"
)]
#[get("/timeline/{user_id}")]
pub async fn timeline(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    params: web::Query<PageParams>,
) -> ApiResult<web::Json<Envelope<Vec<Post>>>> {
    let query = TimelineQuery::new(path.into_inner(), params.to_page());
    let posts = state.timeline.timeline(&query).await?;
    Ok(web::Json(Envelope::new(posts)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::ports::{
        MockFollowCommand, MockPostCommand, MockSocialGraphQuery, MockTimelineQueryPort,
    };
    use crate::domain::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(None, None, DEFAULT_PAGE_LIMIT, 0)]
    #[case(Some("abc"), Some("xyz"), DEFAULT_PAGE_LIMIT, 0)]
    #[case(Some("500"), Some("-2"), MAX_PAGE_LIMIT, 0)]
    #[case(Some("10"), Some("20"), 10, 20)]
    fn page_params_fall_back_to_defaults(
        #[case] limit: Option<&str>,
        #[case] offset: Option<&str>,
        #[case] expected_limit: usize,
        #[case] expected_offset: usize,
    ) {
        let params = PageParams {
            limit: limit.map(str::to_owned),
            offset: offset.map(str::to_owned),
        };
        let page = params.to_page();
        assert_eq!(page.limit(), expected_limit);
        assert_eq!(page.offset(), expected_offset);
    }

    #[rstest]
    #[actix_web::test]
    async fn timeline_wraps_posts_in_data_envelope() {
        let mut timeline_port = MockTimelineQueryPort::new();
        timeline_port
            .expect_timeline()
            .withf(|query| query.subject_user_id() == "u1" && query.page().limit() == 5)
            .times(1)
            .return_once(|_| Ok(vec![Post::new("p1", "u2", "hi", 3).expect("valid post")]));
        let state = HttpState::new(
            Arc::new(MockPostCommand::new()),
            Arc::new(MockFollowCommand::new()),
            Arc::new(MockSocialGraphQuery::new()),
            Arc::new(timeline_port),
        );

        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(web::scope("/v1").service(timeline)),
        )
        .await;
        let request = actix_test::TestRequest::get()
            .uri("/v1/timeline/u1?limit=5")
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body,
            json!({ "data": [{ "id": "p1", "user_id": "u2", "text": "hi", "created_at": 3 }] })
        );
    }
}
