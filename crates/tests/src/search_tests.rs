use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;

use crate::common::{self, Upstream, TEST_API_KEY};

#[tokio::test]
async fn test_search_passes_upstream_payload_through() {
    let (app, upstream) = common::test_app(Upstream::Json(common::search_payload())).await;

    let (status, body) = common::get_json(&app, "/api/search?s=batman").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, common::search_payload());

    let calls = upstream.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0]["s"], "batman");
    assert_eq!(calls[0]["apikey"], TEST_API_KEY);
}

#[tokio::test]
async fn test_search_trims_query_before_forwarding() {
    let (app, upstream) = common::test_app(Upstream::Json(common::search_payload())).await;

    let (status, _) = common::get_json(&app, "/api/search?s=%20%20star%20wars%20").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(upstream.calls()[0]["s"], "star wars");
}

#[tokio::test]
async fn test_search_not_found_is_passed_through_as_200() {
    let not_found = json!({"Response": "False", "Error": "Movie not found!"});
    let (app, _upstream) = common::test_app(Upstream::Json(not_found.clone())).await;

    let (status, body) = common::get_json(&app, "/api/search?s=zzzzqqq").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, not_found);
}

#[tokio::test]
async fn test_search_short_query_rejected_without_upstream_call() {
    let (app, upstream) = common::test_app(Upstream::Json(common::search_payload())).await;

    let (status, body) = common::get_json(&app, "/api/search?s=ab").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"Response": "False", "Error": "Search query must be at least 3 characters"})
    );
    assert!(upstream.calls().is_empty());
}

#[tokio::test]
async fn test_search_missing_query_rejected() {
    let (app, upstream) = common::test_app(Upstream::Json(common::search_payload())).await;

    for uri in ["/api/search", "/api/search?s="] {
        let (status, body) = common::get_json(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["Error"], "Invalid search query");
    }
    assert!(upstream.calls().is_empty());
}

#[tokio::test]
async fn test_search_long_query_rejected() {
    let (app, _upstream) = common::test_app(Upstream::Json(common::search_payload())).await;

    let uri = format!("/api/search?s={}", "a".repeat(101));
    let (status, body) = common::get_json(&app, &uri).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["Error"], "Search query must be no more than 100 characters");
}

#[tokio::test]
async fn test_search_unsafe_query_rejected() {
    let (app, upstream) = common::test_app(Upstream::Json(common::search_payload())).await;

    let (status, body) =
        common::get_json(&app, "/api/search?s=%3Cscript%3Ealert(1)%3C%2Fscript%3E").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["Error"], "Invalid characters in search query");

    let (status, _) = common::get_json(&app, "/api/search?s=x%20onclick%3Dfoo").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(upstream.calls().is_empty());
}

#[tokio::test]
async fn test_search_upstream_error_status_maps_to_500() {
    let (app, _upstream) = common::test_app(Upstream::Status(503)).await;

    let (status, body) = common::get_json(&app, "/api/search?s=batman").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"Response": "False", "Error": "Failed to search movies"}));
}

#[tokio::test]
async fn test_search_upstream_garbage_maps_to_500() {
    let (app, _upstream) = common::test_app(Upstream::Garbage).await;

    let (status, body) = common::get_json(&app, "/api/search?s=batman").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["Error"], "Failed to search movies");
}

#[tokio::test]
async fn test_search_slow_upstream_maps_to_504() {
    let (app, _upstream) = common::test_app(Upstream::Slow(
        Duration::from_secs(3),
        common::search_payload(),
    ))
    .await;

    let (status, body) = common::get_json(&app, "/api/search?s=batman").await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(
        body,
        json!({"Response": "False", "Error": "Request timeout. Please try again."})
    );
}

#[tokio::test]
async fn test_search_unreachable_upstream_maps_to_500() {
    // Reserve a port and release it so nothing is listening there.
    let closed_port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let (app, _upstream) = common::test_app_with(Upstream::Json(common::search_payload()), |config| {
        config.api_url = format!("http://127.0.0.1:{closed_port}");
    })
    .await;

    let (status, body) = common::get_json(&app, "/api/search?s=batman").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["Error"], "Failed to search movies");
}

#[tokio::test]
async fn test_search_repeated_parameter_gets_error_envelope() {
    let (app, upstream) = common::test_app(Upstream::Json(common::search_payload())).await;

    let (status, body) = common::get_json(&app, "/api/search?s=batman&s=superman").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"Response": "False", "Error": "Invalid search query"}));
    assert!(upstream.calls().is_empty());
}
