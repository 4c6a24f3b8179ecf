//! End-to-end HTTP behaviour over the in-memory stores.
//!
//! Each test builds the full application (trace middleware, `/v1` API and
//! health probes) around fresh stores and a test-controlled clock, then
//! drives it through Actix's in-process test server.

use std::sync::Arc;
use std::time::Duration;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::{App, test as actix_test, web};
use chrono::{TimeZone, Utc};
use feed_backend::Trace;
use feed_backend::domain::{POST_TEXT_MAX, RateLimitConfig, TRACE_ID_HEADER};
use feed_backend::inbound::http::health::HealthState;
use feed_backend::inbound::http::{configure_api, configure_health};
use feed_backend::outbound::memory::{InMemoryPostRepository, InMemorySocialGraph};
use feed_backend::test_support::{MutableClock, memory_http_state};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

struct Harness {
    clock: Arc<MutableClock>,
    graph: Arc<InMemorySocialGraph>,
    posts: Arc<InMemoryPostRepository>,
    state: web::Data<feed_backend::inbound::http::state::HttpState>,
    health: web::Data<HealthState>,
}

fn harness_with(rate_limit: RateLimitConfig) -> Harness {
    let start = Utc
        .with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
        .single()
        .expect("valid start instant");
    let clock = Arc::new(MutableClock::new(start));
    let (state, graph, posts) = memory_http_state(rate_limit, clock.clone());
    let health = web::Data::new(HealthState::new());
    health.mark_ready();
    Harness {
        clock,
        graph,
        posts,
        state: web::Data::new(state),
        health,
    }
}

#[fixture]
fn harness() -> Harness {
    harness_with(RateLimitConfig::default())
}

async fn init(
    harness: &Harness,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    actix_test::init_service(
        App::new()
            .app_data(harness.health.clone())
            .app_data(harness.state.clone())
            .wrap(Trace)
            .configure(configure_api)
            .configure(configure_health),
    )
    .await
}

async fn post_json<S>(app: &S, uri: &str, body: Value) -> ServiceResponse
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = actix_test::TestRequest::post()
        .uri(uri)
        .set_json(body)
        .to_request();
    actix_test::call_service(app, request).await
}

async fn delete_json<S>(app: &S, uri: &str, body: Value) -> ServiceResponse
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = actix_test::TestRequest::delete()
        .uri(uri)
        .set_json(body)
        .to_request();
    actix_test::call_service(app, request).await
}

async fn get_json<S>(app: &S, uri: &str) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = actix_test::TestRequest::get().uri(uri).to_request();
    let response = actix_test::call_service(app, request).await;
    let status = response.status();
    (status, actix_test::read_body_json(response).await)
}

#[rstest]
#[actix_web::test]
async fn timeline_shows_only_followed_authors(harness: Harness) {
    let app = init(&harness).await;

    let follow = post_json(
        &app,
        "/v1/follows",
        json!({ "follower_id": "u1", "followee_id": "u2" }),
    )
    .await;
    assert_eq!(follow.status(), StatusCode::CREATED);

    for (author, text) in [("u2", "from u2"), ("u3", "from u3")] {
        let response = post_json(&app, "/v1/tweets", json!({ "user_id": author, "text": text })).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let (status, body) = get_json(&app, "/v1/timeline/u1").await;
    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().expect("data array");
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["user_id"], json!("u2"));
    assert_eq!(data[0]["text"], json!("from u2"));
}

#[rstest]
#[actix_web::test]
async fn timeline_is_newest_first_and_paginated(harness: Harness) {
    let app = init(&harness).await;
    post_json(
        &app,
        "/v1/follows",
        json!({ "follower_id": "u1", "followee_id": "u2" }),
    )
    .await;

    for n in 0..3 {
        post_json(&app, "/v1/tweets", json!({ "user_id": "u2", "text": format!("post {n}") })).await;
        harness.clock.advance_seconds(1);
    }

    let (_, body) = get_json(&app, "/v1/timeline/u1?limit=2").await;
    let texts: Vec<&str> = body["data"]
        .as_array()
        .expect("data array")
        .iter()
        .filter_map(|post| post["text"].as_str())
        .collect();
    assert_eq!(texts, ["post 2", "post 1"]);

    let (_, body) = get_json(&app, "/v1/timeline/u1?limit=2&offset=2").await;
    assert_eq!(body["data"][0]["text"], json!("post 0"));
}

#[rstest]
#[actix_web::test]
async fn timeline_without_followees_is_empty(harness: Harness) {
    let app = init(&harness).await;
    post_json(&app, "/v1/tweets", json!({ "user_id": "u9", "text": "hello" })).await;

    let (status, body) = get_json(&app, "/v1/timeline/u1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "data": [] }));
}

#[rstest]
#[actix_web::test]
async fn unparsable_pagination_falls_back_to_defaults(harness: Harness) {
    let app = init(&harness).await;
    let (status, _) = get_json(&app, "/v1/timeline/u1?limit=abc&offset=-4").await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn third_post_in_window_is_rate_limited() {
    let harness = harness_with(RateLimitConfig {
        enabled: true,
        window: Duration::from_secs(60),
        max_per_window: 2,
    });
    let app = init(&harness).await;

    for _ in 0..2 {
        let response = post_json(&app, "/v1/tweets", json!({ "user_id": "u1", "text": "x" })).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let denied = post_json(&app, "/v1/tweets", json!({ "user_id": "u1", "text": "x" })).await;
    assert_eq!(denied.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(
        denied
            .headers()
            .get(header::RETRY_AFTER)
            .and_then(|value| value.to_str().ok()),
        Some("60")
    );
    let body: Value = actix_test::read_body_json(denied).await;
    assert_eq!(body["code"], json!("rate_limited"));

    // Another author has an independent budget.
    let other = post_json(&app, "/v1/tweets", json!({ "user_id": "u2", "text": "x" })).await;
    assert_eq!(other.status(), StatusCode::CREATED);

    harness.clock.advance_seconds(60);
    let reopened = post_json(&app, "/v1/tweets", json!({ "user_id": "u1", "text": "x" })).await;
    assert_eq!(reopened.status(), StatusCode::CREATED);
    assert_eq!(harness.posts.len(), 4);
}

#[actix_web::test]
async fn disabled_rate_limit_admits_every_post() {
    let harness = harness_with(RateLimitConfig {
        enabled: false,
        window: Duration::from_secs(60),
        max_per_window: 1,
    });
    let app = init(&harness).await;

    for _ in 0..5 {
        let response = post_json(&app, "/v1/tweets", json!({ "user_id": "u1", "text": "x" })).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}

#[rstest]
#[case(POST_TEXT_MAX, StatusCode::CREATED)]
#[case(POST_TEXT_MAX + 1, StatusCode::UNPROCESSABLE_ENTITY)]
#[case(0, StatusCode::UNPROCESSABLE_ENTITY)]
#[actix_web::test]
async fn post_length_is_enforced(
    harness: Harness,
    #[case] length: usize,
    #[case] expected: StatusCode,
) {
    let app = init(&harness).await;
    let response = post_json(
        &app,
        "/v1/tweets",
        json!({ "user_id": "u1", "text": "a".repeat(length) }),
    )
    .await;
    assert_eq!(response.status(), expected);
}

#[rstest]
#[case(json!({ "text": "hola" }))]
#[case(json!({ "user_id": "u1" }))]
#[actix_web::test]
async fn missing_post_fields_are_bad_requests(harness: Harness, #[case] body: Value) {
    let app = init(&harness).await;
    let response = post_json(&app, "/v1/tweets", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], json!("invalid_request"));
}

#[rstest]
#[actix_web::test]
async fn malformed_json_is_a_bad_request(harness: Harness) {
    let app = init(&harness).await;
    let request = actix_test::TestRequest::post()
        .uri("/v1/tweets")
        .insert_header(header::ContentType::json())
        .set_payload("{not json")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers().contains_key(TRACE_ID_HEADER));
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], json!("invalid payload"));
}

#[rstest]
#[actix_web::test]
async fn follow_and_unfollow_are_idempotent(harness: Harness) {
    let app = init(&harness).await;
    let pair = json!({ "follower_id": "u1", "followee_id": "u2" });

    for _ in 0..2 {
        let response = post_json(&app, "/v1/follows", pair.clone()).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }
    assert_eq!(harness.graph.edge_count(), 1);

    let (_, following) = get_json(&app, "/v1/users/u1/following").await;
    assert_eq!(following, json!({ "data": ["u2"] }));
    let (_, followers) = get_json(&app, "/v1/users/u2/followers").await;
    assert_eq!(followers, json!({ "data": ["u1"] }));

    for _ in 0..2 {
        let response = delete_json(&app, "/v1/follows", pair.clone()).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
    assert_eq!(harness.graph.edge_count(), 0);
}

#[rstest]
#[actix_web::test]
async fn self_follow_is_rejected(harness: Harness) {
    let app = init(&harness).await;
    let response = post_json(
        &app,
        "/v1/follows",
        json!({ "follower_id": "u1", "followee_id": "u1" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], json!("cannot follow self"));
}

#[rstest]
#[actix_web::test]
async fn user_posts_lists_only_that_author(harness: Harness) {
    let app = init(&harness).await;
    post_json(&app, "/v1/tweets", json!({ "user_id": "u1", "text": "mine" })).await;
    post_json(&app, "/v1/tweets", json!({ "user_id": "u2", "text": "theirs" })).await;

    let (status, body) = get_json(&app, "/v1/users/u1/tweets").await;
    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().expect("data array");
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["text"], json!("mine"));
    assert_eq!(data[0]["id"], json!("post-1"));
}

#[rstest]
#[case("/healthz")]
#[case("/health/ready")]
#[case("/health/live")]
#[actix_web::test]
async fn health_probes_report_ok(harness: Harness, #[case] uri: &str) {
    let app = init(&harness).await;
    let (status, body) = get_json(&app, uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));
}

#[rstest]
#[actix_web::test]
async fn every_response_carries_a_trace_id(harness: Harness) {
    let app = init(&harness).await;
    let request = actix_test::TestRequest::get().uri("/healthz").to_request();
    let response = actix_test::call_service(&app, request).await;
    assert!(response.headers().contains_key(TRACE_ID_HEADER));
}
