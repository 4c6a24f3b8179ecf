//! Tests for the error payload constructors and its JSON shape.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[fixture]
fn base_error() -> Error {
    Error::validation_failed("bad")
}

#[rstest]
#[case(Error::invalid_request("x"), ErrorCode::InvalidRequest)]
#[case(Error::validation_failed("x"), ErrorCode::ValidationFailed)]
#[case(Error::rate_limited("x"), ErrorCode::RateLimited)]
#[case(Error::service_unavailable("x"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("x"), ErrorCode::InternalError)]
fn convenience_constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
#[case(ErrorCode::InvalidRequest, "invalid request")]
#[case(ErrorCode::InternalError, "Internal server error")]
fn blank_messages_fall_back_to_generic_text(#[case] code: ErrorCode, #[case] expected: &str) {
    let error = Error::new(code, "   ");
    assert_eq!(error.message(), expected);
}

#[rstest]
fn with_trace_id_replaces_captured_value(base_error: Error, expected_trace_id: String) {
    let error = base_error.with_trace_id(expected_trace_id.clone());
    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let error = TraceId::scope(trace_id, async move {
        Error::new(ErrorCode::InternalError, "boom")
    })
    .await;

    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
fn serialises_with_snake_case_codes_and_camel_case_fields(expected_trace_id: String) {
    let error = Error::rate_limited("slow down")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({ "retryAfterSecs": 30 }));

    let value = serde_json::to_value(&error).expect("serialise error");
    assert_eq!(value["code"], json!("rate_limited"));
    assert_eq!(value["message"], json!("slow down"));
    assert_eq!(value["traceId"], json!(expected_trace_id));
    assert_eq!(value["details"]["retryAfterSecs"], json!(30));
}

#[rstest]
fn absent_trace_and_details_are_omitted(base_error: Error) {
    let value = serde_json::to_value(&base_error).expect("serialise error");
    assert_eq!(value, json!({ "code": "validation_failed", "message": "bad" }));
}

#[rstest]
#[case(Duration::from_secs(45), 45)]
#[case(Duration::from_millis(1_500), 2)]
#[case(Duration::ZERO, 0)]
fn rate_limited_for_records_whole_seconds(#[case] delay: Duration, #[case] expected: u64) {
    let error = Error::rate_limited_for(delay);
    assert_eq!(error.code(), ErrorCode::RateLimited);
    assert_eq!(error.retry_after_secs(), Some(expected));
}

#[rstest]
fn retry_after_is_absent_for_other_codes() {
    let error = Error::validation_failed("bad").with_details(json!({ RETRY_AFTER_DETAIL: 5 }));
    assert!(error.retry_after_secs().is_none());
}

#[rstest]
fn validation_errors_convert_to_validation_failed() {
    let error = Error::from(FollowValidationError::SelfFollow);
    assert_eq!(error.code(), ErrorCode::ValidationFailed);
    assert_eq!(error.message(), "cannot follow self");

    let error = Error::from(PostValidationError::EmptyText);
    assert_eq!(error.code(), ErrorCode::ValidationFailed);
}
