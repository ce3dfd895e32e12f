//! Problem Details assertions.
//!
//! Checks the stable error contract of an `application/problem+json`
//! response without depending on the backend's own types.

use actix_web::http::StatusCode;
use serde::Deserialize;

/// Mirror of the backend's problem details body.
#[derive(Debug, Deserialize)]
pub struct ProblemDetailsLike {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
}

/// Read an `HttpResponse` and assert status, code and (optionally) a detail
/// substring. Returns the parsed body for further checks.
pub async fn assert_problem_details(
    resp: actix_web::HttpResponse,
    expected_code: &str,
    expected_status: StatusCode,
    expected_detail_contains: Option<&str>,
) -> ProblemDetailsLike {
    assert_eq!(resp.status(), expected_status);

    let content_type = resp
        .headers()
        .get(actix_web::http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    assert_eq!(content_type.as_deref(), Some("application/problem+json"));

    let body = actix_web::body::to_bytes(resp.into_body())
        .await
        .expect("response body should be readable");
    let problem: ProblemDetailsLike =
        serde_json::from_slice(&body).expect("body should be ProblemDetails JSON");

    assert_eq!(problem.code, expected_code);
    assert_eq!(problem.status, expected_status.as_u16());
    assert!(
        problem.type_.ends_with(&problem.code),
        "type URI '{}' should end with code '{}'",
        problem.type_,
        problem.code
    );

    if let Some(expected) = expected_detail_contains {
        assert!(
            problem.detail.contains(expected),
            "Expected detail to contain '{}', but got '{}'",
            expected,
            problem.detail
        );
    }

    problem
}
