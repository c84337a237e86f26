use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{self, Upstream};

#[tokio::test]
async fn test_allowed_origin_gets_cors_headers() {
    let (app, _upstream) = common::test_app(Upstream::Json(common::search_payload())).await;

    let response =
        common::get_with_origin(&app, "/api/search?s=batman", "http://localhost:8080").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:8080"
    );
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS],
        "true"
    );
}

#[tokio::test]
async fn test_disallowed_origin_is_rejected_with_403() {
    let (app, upstream) = common::test_app(Upstream::Json(common::search_payload())).await;

    let response =
        common::get_with_origin(&app, "/api/search?s=batman", "https://evil.example").await;
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
    let (status, body) = common::into_json(response).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, json!({"Response": "False", "Error": "Not allowed by CORS"}));
    assert!(upstream.calls().is_empty());
}

#[tokio::test]
async fn test_configured_origins_replace_defaults() {
    let (app, _upstream) =
        common::test_app_with(Upstream::Json(common::search_payload()), |config| {
            config.allowed_origins = vec!["https://movies.example".to_string()];
        })
        .await;

    let ok = common::get_with_origin(&app, "/api/search?s=batman", "https://movies.example").await;
    assert_eq!(ok.status(), StatusCode::OK);

    let rejected =
        common::get_with_origin(&app, "/api/search?s=batman", "http://localhost").await;
    assert_eq!(rejected.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_request_without_origin_passes() {
    let (app, _upstream) = common::test_app(Upstream::Json(common::search_payload())).await;

    let (status, _) = common::get_json(&app, "/api/search?s=batman").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_preflight_for_allowed_origin() {
    let (app, _upstream) = common::test_app(Upstream::Json(common::search_payload())).await;

    let req = Request::builder()
        .method("OPTIONS")
        .uri("/api/search?s=batman")
        .header(header::ORIGIN, "http://127.0.0.1:5500")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .body(Body::empty())
        .unwrap();
    let response = common::send(&app, req).await;
    assert!(response.status().is_success());
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://127.0.0.1:5500"
    );
}

#[tokio::test]
async fn test_security_headers_on_every_response() {
    let (app, _upstream) = common::test_app(Upstream::Json(common::search_payload())).await;

    for uri in ["/api/search?s=batman", "/api/search?s=ab", "/health"] {
        let response = common::get_with_origin(&app, uri, "http://localhost").await;
        let headers = response.headers();
        assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff", "{uri}");
        assert_eq!(headers[header::X_FRAME_OPTIONS], "SAMEORIGIN", "{uri}");
        assert_eq!(headers[header::REFERRER_POLICY], "no-referrer", "{uri}");
        assert_eq!(headers["cross-origin-resource-policy"], "same-origin", "{uri}");
        assert!(headers.contains_key("x-request-id"), "{uri}");
    }
}
