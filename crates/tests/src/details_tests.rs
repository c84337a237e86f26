use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;

use crate::common::{self, Upstream};

#[tokio::test]
async fn test_details_passes_upstream_payload_through() {
    let (app, upstream) = common::test_app(Upstream::Json(common::details_payload())).await;

    let (status, body) = common::get_json(&app, "/api/details?i=tt0372784").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, common::details_payload());
    assert_eq!(upstream.calls()[0]["i"], "tt0372784");
}

#[tokio::test]
async fn test_details_missing_id_rejected() {
    let (app, upstream) = common::test_app(Upstream::Json(common::details_payload())).await;

    let (status, body) = common::get_json(&app, "/api/details").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"Response": "False", "Error": "Invalid IMDB ID"}));
    assert!(upstream.calls().is_empty());
}

#[tokio::test]
async fn test_details_bad_format_rejected() {
    let (app, upstream) = common::test_app(Upstream::Json(common::details_payload())).await;

    for uri in ["/api/details?i=nm0000123", "/api/details?i=tt", "/api/details?i=tt12ab"] {
        let (status, body) = common::get_json(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["Error"], "Invalid IMDB ID format");
    }
    assert!(upstream.calls().is_empty());
}

#[tokio::test]
async fn test_details_overlong_id_rejected() {
    let (app, _upstream) = common::test_app(Upstream::Json(common::details_payload())).await;

    let uri = format!("/api/details?i=tt{}", "1".repeat(19));
    let (status, body) = common::get_json(&app, &uri).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["Error"], "IMDB ID is too long");
}

#[tokio::test]
async fn test_details_upstream_failure_maps_to_500() {
    let (app, _upstream) = common::test_app(Upstream::Status(500)).await;

    let (status, body) = common::get_json(&app, "/api/details?i=tt0372784").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"Response": "False", "Error": "Failed to fetch movie details"})
    );
}

#[tokio::test]
async fn test_details_slow_upstream_maps_to_504() {
    let (app, _upstream) = common::test_app(Upstream::Slow(
        Duration::from_secs(3),
        common::details_payload(),
    ))
    .await;

    let (status, body) = common::get_json(&app, "/api/details?i=tt0372784").await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body["Error"], "Request timeout. Please try again.");
}

#[tokio::test]
async fn test_details_repeated_parameter_gets_error_envelope() {
    let (app, upstream) = common::test_app(Upstream::Json(common::details_payload())).await;

    let (status, body) = common::get_json(&app, "/api/details?i=tt1&i=tt2").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"Response": "False", "Error": "Invalid IMDB ID"}));
    assert!(upstream.calls().is_empty());
}
