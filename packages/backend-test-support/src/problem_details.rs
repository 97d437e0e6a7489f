//! Problem Details test helpers for backend testing
//!
//! This module provides utilities for asserting Problem Details responses
//! in integration tests without depending on backend types.

use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};

/// Local ProblemDetails struct that matches the backend's structure
/// but doesn't depend on backend types
#[derive(Debug, Deserialize, Serialize)]
struct ProblemDetailsLike {
    #[serde(rename = "type")]
    type_: String,
    title: String,
    status: u16,
    detail: String,
    code: String,
}

/// Assert that response parts conform to the stable error contract
///
/// Validates:
/// - HTTP status matches expected
/// - body is a Problem Details document with the expected code
/// - `type` ends with the code and `status` mirrors the HTTP status
/// - detail contains the expected fragment (if given)
pub fn assert_problem_details_from_parts(
    status: StatusCode,
    body_bytes: &[u8],
    expected_code: &str,
    expected_status: StatusCode,
    expected_detail_contains: Option<&str>,
) {
    assert_eq!(status, expected_status);

    let body_str =
        String::from_utf8(body_bytes.to_vec()).expect("Response body should be valid UTF-8");
    let problem: ProblemDetailsLike = serde_json::from_str(&body_str)
        .expect("Response body should be valid ProblemDetails JSON");

    assert_eq!(problem.code, expected_code);
    assert_eq!(problem.status, expected_status.as_u16());
    assert!(
        problem.type_.ends_with(expected_code),
        "type '{}' should end with code '{expected_code}'",
        problem.type_
    );
    assert!(!problem.title.is_empty(), "title should not be empty");

    if let Some(fragment) = expected_detail_contains {
        assert!(
            problem.detail.contains(fragment),
            "detail '{}' should contain '{fragment}'",
            problem.detail
        );
    }
}
