use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use shared_types::AppError;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

pub const GENERAL_LIMIT_MESSAGE: &str = "Too many requests, please try again later.";
pub const SEARCH_LIMIT_MESSAGE: &str = "Too many search requests, please try again later.";
pub const DETAILS_LIMIT_MESSAGE: &str = "Too many detail requests, please try again later.";

pub const RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("ratelimit-limit");
pub const RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("ratelimit-remaining");
pub const RATELIMIT_RESET: HeaderName = HeaderName::from_static("ratelimit-reset");

/// Windows are only swept once the table grows past this many clients.
const SWEEP_THRESHOLD: usize = 1024;

/// Fixed window rate limit state shared across requests.
#[derive(Clone)]
pub struct RateLimitState {
    inner: Arc<Mutex<RateLimitInner>>,
    message: Arc<str>,
}

struct RateLimitInner {
    /// Map from client key -> current window.
    clients: HashMap<String, Window>,
    max_requests: u32,
    window: Duration,
}

struct Window {
    started: Instant,
    hits: u32,
}

/// Outcome of counting one request against a limiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    /// Time until the client's window resets.
    pub reset: Duration,
}

impl Decision {
    /// Write the `RateLimit-*` headers unless an inner limiter already did.
    pub fn apply_headers(&self, headers: &mut HeaderMap) {
        let reset_secs = self.reset.as_secs() + u64::from(self.reset.subsec_nanos() > 0);
        for (name, value) in [
            (RATELIMIT_LIMIT, u64::from(self.limit)),
            (RATELIMIT_REMAINING, u64::from(self.remaining)),
            (RATELIMIT_RESET, reset_secs),
        ] {
            headers.entry(name).or_insert(HeaderValue::from(value));
        }
    }
}

impl RateLimitState {
    /// Create rate limiter allowing `max_requests` per `window`, answering
    /// with `message` once exhausted.
    pub fn new(max_requests: u32, window: Duration, message: &str) -> Self {
        Self {
            inner: Arc::new(Mutex::new(RateLimitInner {
                clients: HashMap::new(),
                max_requests,
                window,
            })),
            message: Arc::from(message),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Count a request from `key` at `now`.
    pub fn check(&self, key: &str, now: Instant) -> Decision {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let window = inner.window;
        let max = inner.max_requests;

        if inner.clients.len() > SWEEP_THRESHOLD {
            inner
                .clients
                .retain(|_, w| now.duration_since(w.started) < window);
        }

        let entry = inner.clients.entry(key.to_string()).or_insert(Window {
            started: now,
            hits: 0,
        });
        if now.duration_since(entry.started) >= window {
            entry.started = now;
            entry.hits = 0;
        }

        let reset = window.saturating_sub(now.duration_since(entry.started));
        if entry.hits >= max {
            return Decision {
                allowed: false,
                limit: max,
                remaining: 0,
                reset,
            };
        }

        entry.hits += 1;
        Decision {
            allowed: true,
            limit: max,
            remaining: max - entry.hits,
            reset,
        }
    }
}

/// Client key: the peer IP when the server was started with connect info.
fn client_key(request: &Request) -> String {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Axum middleware that enforces one limiter.
///
/// Limiters stack: the general `/api` ceiling wraps each route's own
/// limiter, and the headers of the innermost limiter that ran are kept.
pub async fn rate_limit_middleware(
    State(state): State<RateLimitState>,
    request: Request,
    next: Next,
) -> Response {
    let key = client_key(&request);
    let decision = state.check(&key, Instant::now());

    if !decision.allowed {
        tracing::warn!(client = %key, limit = decision.limit, path = %request.uri().path(), "rate limit exceeded");
        let mut response = AppError::rate_limited(state.message()).into_response();
        decision.apply_headers(response.headers_mut());
        return response;
    }

    let mut response = next.run(request).await;
    decision.apply_headers(response.headers_mut());
    response
}
