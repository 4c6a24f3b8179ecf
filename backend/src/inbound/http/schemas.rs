//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic and do not derive `ToSchema`. The
//! wrappers here mirror their wire shape for documentation only.

use serde::Serialize;
use utoipa::ToSchema;

/// Success envelope: every 2xx JSON body is `{"data": ...}`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request body is malformed or a required field is absent.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The request decoded but broke a domain rule.
    #[schema(rename = "validation_failed")]
    ValidationFailed,
    /// The author exhausted the current rate-limit window.
    #[schema(rename = "rate_limited")]
    RateLimited,
    /// A storage backend is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "validation_failed")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "text must not be empty")]
    message: String,
    /// Correlation identifier, echoed in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Post`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Post)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PostSchema {
    #[schema(example = "0190b7c4-8f3e-7a51-9d3c-5f2a1b6e4c21")]
    id: String,
    /// Author id.
    #[schema(example = "u1")]
    user_id: String,
    /// Between 1 and 280 characters.
    #[schema(example = "hola")]
    text: String,
    /// Epoch seconds.
    #[schema(example = 1_700_000_000)]
    created_at: i64,
}

/// OpenAPI schema for [`crate::domain::FollowEdge`].
#[derive(ToSchema)]
#[schema(as = crate::domain::FollowEdge)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct FollowEdgeSchema {
    id: String,
    #[schema(example = "u1")]
    follower_id: String,
    #[schema(example = "u2")]
    followee_id: String,
    /// Epoch seconds.
    created_at: i64,
}

#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PostEnvelopeSchema {
    data: PostSchema,
}

#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PostListEnvelopeSchema {
    data: Vec<PostSchema>,
}

#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct FollowEdgeEnvelopeSchema {
    data: FollowEdgeSchema,
}

#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserIdListEnvelopeSchema {
    data: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn error_code_schema_lists_every_code() {
        let schema_json = schema_to_json::<ErrorCodeSchema>();
        for code in [
            "invalid_request",
            "validation_failed",
            "rate_limited",
            "service_unavailable",
            "internal_error",
        ] {
            assert!(schema_json.contains(code), "missing {code}");
        }
    }

    #[test]
    fn error_schema_uses_wire_field_names() {
        let schema_json = schema_to_json::<ErrorSchema>();
        assert!(schema_json.contains("traceId"));
    }

    #[test]
    fn post_schema_matches_wire_shape() {
        let schema_json = schema_to_json::<PostSchema>();
        assert!(schema_json.contains("user_id"));
        assert!(schema_json.contains("created_at"));
    }

    #[test]
    fn envelope_wraps_payload_under_data() {
        let value = serde_json::to_value(Envelope::new(vec!["u2"])).expect("serialise");
        assert_eq!(value, json!({ "data": ["u2"] }));
    }
}
