use axum::{
    body::Body,
    extract::{Query, State},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use server::config::{parse_origins, ProxyConfig, RateLimits};
use server::{build_router, AppState};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;

pub const TEST_API_KEY: &str = "test-key";

/// How the fake metadata API answers.
#[derive(Clone)]
pub enum Upstream {
    /// 200 with this body.
    Json(Value),
    /// Bare status with a plain-text body.
    Status(u16),
    /// 200 with a body that is not JSON.
    Garbage,
    /// Answer only after the delay.
    Slow(Duration, Value),
}

/// A running fake upstream and the query strings it has received.
pub struct MockUpstream {
    pub base_url: String,
    calls: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

impl MockUpstream {
    pub fn calls(&self) -> Vec<HashMap<String, String>> {
        self.calls.lock().unwrap().clone()
    }
}

#[derive(Clone)]
struct MockState {
    behavior: Upstream,
    calls: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

async fn mock_handler(
    State(mock): State<MockState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    mock.calls.lock().unwrap().push(params);
    match mock.behavior {
        Upstream::Json(body) => Json(body).into_response(),
        Upstream::Status(code) => (StatusCode::from_u16(code).unwrap(), "upstream failure").into_response(),
        Upstream::Garbage => "<html>definitely not json</html>".into_response(),
        Upstream::Slow(delay, body) => {
            tokio::time::sleep(delay).await;
            Json(body).into_response()
        }
    }
}

/// Serve a fake upstream on an ephemeral local port.
pub async fn spawn_upstream(behavior: Upstream) -> MockUpstream {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        behavior,
        calls: calls.clone(),
    };
    let router = Router::new().route("/", get(mock_handler)).with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock upstream");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    MockUpstream {
        base_url: format!("http://{addr}"),
        calls,
    }
}

pub fn test_config(api_url: &str) -> ProxyConfig {
    ProxyConfig {
        api_key: TEST_API_KEY.to_string(),
        api_url: api_url.to_string(),
        port: 0,
        allowed_origins: parse_origins(None),
        upstream_timeout_secs: 1,
        limits: RateLimits::default(),
    }
}

/// Build the full proxy router in front of a fake upstream.
pub async fn test_app(behavior: Upstream) -> (Router, MockUpstream) {
    test_app_with(behavior, |_| {}).await
}

/// Like [`test_app`], with a hook to adjust the configuration first.
pub async fn test_app_with(
    behavior: Upstream,
    configure: impl FnOnce(&mut ProxyConfig),
) -> (Router, MockUpstream) {
    let upstream = spawn_upstream(behavior).await;
    let mut config = test_config(&upstream.base_url);
    configure(&mut config);
    let state = AppState::from_config(config).expect("Failed to build app state");
    (build_router(state), upstream)
}

pub fn search_payload() -> Value {
    json!({
        "Search": [
            {"Title": "Batman Begins", "Year": "2005", "imdbID": "tt0372784", "Type": "movie", "Poster": "https://img.example/bb.jpg"},
            {"Title": "Batman: The Animated Series", "Year": "1992-1995", "imdbID": "tt0103359", "Type": "series", "Poster": "N/A"}
        ],
        "totalResults": "2",
        "Response": "True"
    })
}

pub fn details_payload() -> Value {
    json!({
        "Title": "Batman Begins",
        "Year": "2005",
        "Rated": "PG-13",
        "Runtime": "140 min",
        "Genre": "Action, Crime, Drama",
        "Director": "Christopher Nolan",
        "Plot": "After witnessing his parents' death, Bruce learns the art of fighting.",
        "imdbRating": "8.2",
        "BoxOffice": "N/A",
        "imdbID": "tt0372784",
        "Response": "True"
    })
}

/// GET a route without an `Origin` header.
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = send(app, req).await;
    into_json(response).await
}

/// GET a route from a browser origin.
pub async fn get_with_origin(app: &Router, uri: &str, origin: &str) -> Response {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .header("origin", origin)
        .body(Body::empty())
        .unwrap();

    send(app, req).await
}

/// Send a request through the router.
pub async fn send(app: &Router, req: Request<Body>) -> Response {
    app.clone()
        .oneshot(req)
        .await
        .expect("Failed to send request")
}

/// Split a response into status and parsed JSON (`Null` for empty bodies).
pub async fn into_json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");

    let body: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
    };

    (status, body)
}
