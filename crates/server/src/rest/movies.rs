use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde_json::Value;

use crate::upstream::UpstreamClient;
use shared_types::{
    validate_external_id, validate_search_query, AppError, DetailRecord, DetailsParams,
    ErrorEnvelope, SearchParams, SearchResponse, ValidationError,
};

pub const SEARCH_FAILED_MESSAGE: &str = "Failed to search movies";
pub const DETAILS_FAILED_MESSAGE: &str = "Failed to fetch movie details";

// ---------------------------------------------------------------------------
// GET /api/search
// ---------------------------------------------------------------------------

/// Search titles. The upstream payload is passed through untouched,
/// including `{"Response":"False"}` no-result answers.
#[utoipa::path(
    get,
    path = "/api/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Upstream search payload", body = SearchResponse),
        (status = 400, description = "Invalid query", body = ErrorEnvelope),
        (status = 403, description = "Origin not allowed", body = ErrorEnvelope),
        (status = 429, description = "Rate limited", body = ErrorEnvelope),
        (status = 500, description = "Upstream failure", body = ErrorEnvelope),
        (status = 504, description = "Upstream timeout", body = ErrorEnvelope)
    ),
    tag = "movies"
)]
#[tracing::instrument(skip_all)]
pub async fn search_movies(
    State(upstream): State<UpstreamClient>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Value>, AppError> {
    // Repeated or malformed parameters get the same envelope as a bad query.
    let Query(params) = params.map_err(|rejection| {
        tracing::info!(reason = %rejection, "unreadable search parameters");
        AppError::from(ValidationError::InvalidQuery)
    })?;
    let query = validate_search_query(params.s.as_deref()).inspect_err(|err| {
        tracing::info!(reason = %err, "rejected search query");
    })?;

    let payload = upstream.search(&query).await.map_err(|err| {
        tracing::error!(error = %err, "search request failed");
        err.into_app_error(SEARCH_FAILED_MESSAGE)
    })?;

    Ok(Json(payload))
}

// ---------------------------------------------------------------------------
// GET /api/details
// ---------------------------------------------------------------------------

/// Full record for one external identifier.
#[utoipa::path(
    get,
    path = "/api/details",
    params(DetailsParams),
    responses(
        (status = 200, description = "Upstream detail payload", body = DetailRecord),
        (status = 400, description = "Invalid identifier", body = ErrorEnvelope),
        (status = 403, description = "Origin not allowed", body = ErrorEnvelope),
        (status = 429, description = "Rate limited", body = ErrorEnvelope),
        (status = 500, description = "Upstream failure", body = ErrorEnvelope),
        (status = 504, description = "Upstream timeout", body = ErrorEnvelope)
    ),
    tag = "movies"
)]
#[tracing::instrument(skip_all)]
pub async fn movie_details(
    State(upstream): State<UpstreamClient>,
    params: Result<Query<DetailsParams>, QueryRejection>,
) -> Result<Json<Value>, AppError> {
    let Query(params) = params.map_err(|rejection| {
        tracing::info!(reason = %rejection, "unreadable details parameters");
        AppError::from(ValidationError::InvalidId)
    })?;
    let external_id = validate_external_id(params.i.as_deref()).inspect_err(|err| {
        tracing::info!(reason = %err, "rejected external id");
    })?;

    let payload = upstream.details(&external_id).await.map_err(|err| {
        tracing::error!(error = %err, "details request failed");
        err.into_app_error(DETAILS_FAILED_MESSAGE)
    })?;

    Ok(Json(payload))
}
