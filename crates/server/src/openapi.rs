use axum::Router;
use shared_types::{DetailRecord, ErrorEnvelope, SearchResponse, SearchResultItem};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::health::{self, HealthResponse};
use crate::rest::{self, movies};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        movies::search_movies,
        movies::movie_details,
        health::health_check,
    ),
    components(schemas(
        SearchResponse,
        SearchResultItem,
        DetailRecord,
        ErrorEnvelope,
        HealthResponse,
    )),
    tags(
        (name = "movies", description = "Movie search and details, proxied to the metadata API"),
        (name = "health", description = "Health check endpoint")
    ),
    info(
        title = "Movie Search Proxy",
        description = "Rate-limited proxy in front of an OMDb-compatible metadata API",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

/// Build an Axum router that serves the API docs at `/docs`
/// and the REST API at `/api/*`.
pub fn api_router(state: AppState) -> Router {
    let limits = state.config.limits.clone();

    Router::new()
        .merge(rest::api_router(&limits))
        .route("/health", axum::routing::get(health::health_check))
        .with_state(state)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
}
