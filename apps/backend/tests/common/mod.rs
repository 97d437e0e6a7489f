#![allow(dead_code)]

// tests/common/mod.rs
use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details_from_parts;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Assert an error response is a problem+json document with the given code.
pub async fn assert_problem_details(
    resp: ServiceResponse<BoxBody>,
    expected_status: StatusCode,
    expected_code: &str,
    expected_detail_contains: Option<&str>,
) {
    let status = resp.status();
    let headers = resp.headers().clone();

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(
        content_type.starts_with("application/problem+json"),
        "Content-Type must be application/problem+json (got {content_type})"
    );

    // 401 must carry WWW-Authenticate, nothing else does
    assert_eq!(
        headers.get("WWW-Authenticate").is_some(),
        expected_status == StatusCode::UNAUTHORIZED,
        "WWW-Authenticate presence is wrong for status {expected_status}"
    );

    let body = test::read_body(resp).await;
    assert_problem_details_from_parts(
        status,
        &body,
        expected_code,
        expected_status,
        expected_detail_contains,
    );
}
