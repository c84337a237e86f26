use axum::{
    extract::{Request, State},
    http::{header, request::Parts, HeaderValue, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};
use shared_types::AppError;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};

pub const CORS_REJECTED_MESSAGE: &str = "Not allowed by CORS";

/// Configured origin prefixes.
pub type AllowedOrigins = Arc<[String]>;

/// An origin passes when it starts with any configured entry.
pub fn origin_allowed(allowed: &[String], origin: &str) -> bool {
    allowed.iter().any(|prefix| origin.starts_with(prefix.as_str()))
}

fn header_allowed(allowed: &[String], origin: &HeaderValue) -> bool {
    origin
        .to_str()
        .map(|origin| origin_allowed(allowed, origin))
        .unwrap_or(false)
}

/// CORS response headers for allowed origins, with credentials.
pub fn cors_layer(allowed: AllowedOrigins) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| header_allowed(&allowed, origin),
        ))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}

/// Reject requests whose `Origin` is not allowed. Requests without an
/// `Origin` header (curl, same-origin navigation) pass.
pub async fn origin_guard(
    State(allowed): State<AllowedOrigins>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(origin) = request.headers().get(header::ORIGIN) {
        if !header_allowed(&allowed, origin) {
            tracing::warn!(origin = ?origin, "origin rejected");
            return AppError::forbidden(CORS_REJECTED_MESSAGE).into_response();
        }
    }
    next.run(request).await
}
