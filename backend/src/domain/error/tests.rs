//! Tests for the error payload shape and trace propagation.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("x"), ErrorCode::InvalidRequest, "Validation failed")]
#[case(Error::unauthorized("x"), ErrorCode::Unauthorized, "Authentication failed")]
#[case(Error::forbidden("x"), ErrorCode::Forbidden, "Access denied")]
#[case(Error::not_found("x"), ErrorCode::NotFound, "Not found")]
#[case(Error::conflict("x"), ErrorCode::Conflict, "Conflict")]
#[case(Error::service_unavailable("x"), ErrorCode::ServiceUnavailable, "Service unavailable")]
#[case(Error::internal("x"), ErrorCode::InternalError, "Internal server error")]
fn constructors_set_code_and_default_summary(
    #[case] error: Error,
    #[case] code: ErrorCode,
    #[case] summary: &str,
) {
    assert_eq!(error.code(), code);
    assert_eq!(error.summary(), summary);
    assert_eq!(error.message(), "x");
}

#[rstest]
fn with_summary_overrides_default() {
    let error = Error::unauthorized("No token provided").with_summary("Authentication required");
    assert_eq!(error.summary(), "Authentication required");
    assert_eq!(error.to_string(), "Authentication required: No token provided");
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
    let error = TraceId::scope(trace_id, async move { Error::internal("boom") }).await;

    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
fn serialises_summary_as_error_field(expected_trace_id: String) {
    let error = Error::invalid_request("name is required")
        .with_details(json!({ "fields": [{ "field": "name", "message": "name is required" }] }))
        .with_trace_id(expected_trace_id.clone());

    let value = serde_json::to_value(&error).expect("error serialises");

    assert_eq!(
        value,
        json!({
            "code": "invalid_request",
            "error": "Validation failed",
            "message": "name is required",
            "details": { "fields": [{ "field": "name", "message": "name is required" }] },
            "traceId": expected_trace_id,
        })
    );
}

#[rstest]
fn omits_absent_optional_fields() {
    let value = serde_json::to_value(Error::not_found("User not found")).expect("serialises");
    let object = value.as_object().expect("object payload");
    assert!(!object.contains_key("details"));
    assert!(!object.contains_key("traceId"));
}
