use axum::http::StatusCode;

use crate::common::{self, Upstream};

#[tokio::test]
async fn test_health_reports_ok() {
    let (app, _upstream) = common::test_app(Upstream::Json(common::search_payload())).await;

    let (status, body) = common::get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["uptime_seconds"].is_u64());
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_docs_are_served() {
    let (app, _upstream) = common::test_app(Upstream::Json(common::search_payload())).await;

    let response = common::get_with_origin(&app, "/docs", "http://localhost").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (app, _upstream) = common::test_app(Upstream::Json(common::search_payload())).await;

    let (status, _) = common::get_json(&app, "/api/unknown").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
