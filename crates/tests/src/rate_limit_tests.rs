use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use server::rate_limit::{RATELIMIT_LIMIT, RATELIMIT_REMAINING, RATELIMIT_RESET};
use std::time::Duration;

use crate::common::{self, Upstream};

#[tokio::test]
async fn test_search_limit_returns_429_when_exceeded() {
    let (app, upstream) =
        common::test_app_with(Upstream::Json(common::search_payload()), |config| {
            config.limits.search = 2;
        })
        .await;

    let (s1, _) = common::get_json(&app, "/api/search?s=batman").await;
    assert_eq!(s1, StatusCode::OK, "First request should pass");

    let (s2, _) = common::get_json(&app, "/api/search?s=batman").await;
    assert_eq!(s2, StatusCode::OK, "Second request should pass");

    let (s3, body) = common::get_json(&app, "/api/search?s=batman").await;
    assert_eq!(s3, StatusCode::TOO_MANY_REQUESTS, "Third request should be rate limited");
    assert_eq!(body["Response"], "False");
    assert_eq!(body["Error"], "Too many search requests, please try again later.");
    assert_eq!(upstream.calls().len(), 2);
}

#[tokio::test]
async fn test_details_limit_is_independent_of_search_limit() {
    let (app, _upstream) =
        common::test_app_with(Upstream::Json(common::details_payload()), |config| {
            config.limits.search = 1;
            config.limits.details = 1;
        })
        .await;

    let (s1, _) = common::get_json(&app, "/api/search?s=batman").await;
    assert_eq!(s1, StatusCode::OK);

    let (s2, _) = common::get_json(&app, "/api/details?i=tt0372784").await;
    assert_eq!(s2, StatusCode::OK);

    let (s3, body) = common::get_json(&app, "/api/details?i=tt0372784").await;
    assert_eq!(s3, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["Error"], "Too many detail requests, please try again later.");
}

#[tokio::test]
async fn test_general_limit_spans_all_api_routes() {
    let (app, _upstream) =
        common::test_app_with(Upstream::Json(common::search_payload()), |config| {
            config.limits.general = 2;
        })
        .await;

    let (s1, _) = common::get_json(&app, "/api/search?s=batman").await;
    assert_eq!(s1, StatusCode::OK);

    let (s2, _) = common::get_json(&app, "/api/details?i=tt0372784").await;
    assert_eq!(s2, StatusCode::OK);

    let (s3, body) = common::get_json(&app, "/api/search?s=batman").await;
    assert_eq!(s3, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["Error"], "Too many requests, please try again later.");
}

#[tokio::test]
async fn test_validation_failures_count_against_the_limit() {
    let (app, _upstream) =
        common::test_app_with(Upstream::Json(common::search_payload()), |config| {
            config.limits.search = 1;
        })
        .await;

    let (s1, _) = common::get_json(&app, "/api/search?s=ab").await;
    assert_eq!(s1, StatusCode::BAD_REQUEST);

    let (s2, _) = common::get_json(&app, "/api/search?s=batman").await;
    assert_eq!(s2, StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_health_is_not_rate_limited() {
    let (app, _upstream) =
        common::test_app_with(Upstream::Json(common::search_payload()), |config| {
            config.limits.general = 1;
        })
        .await;

    for _ in 0..3 {
        let (status, _) = common::get_json(&app, "/health").await;
        assert_eq!(status, StatusCode::OK);
    }
}

#[tokio::test]
async fn test_rate_limit_headers_report_route_limiter() {
    let (app, _upstream) =
        common::test_app_with(Upstream::Json(common::search_payload()), |config| {
            config.limits.search = 5;
            config.limits.window = Duration::from_secs(60);
        })
        .await;

    let response = common::get_with_origin(&app, "/api/search?s=batman", "http://localhost").await;
    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers[&RATELIMIT_LIMIT], "5");
    assert_eq!(headers[&RATELIMIT_REMAINING], "4");
    let reset: u64 = headers[&RATELIMIT_RESET].to_str().unwrap().parse().unwrap();
    assert!(reset > 0 && reset <= 60);
}
