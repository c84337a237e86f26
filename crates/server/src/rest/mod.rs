pub mod movies;

use crate::config::RateLimits;
use crate::rate_limit::{
    rate_limit_middleware, RateLimitState, DETAILS_LIMIT_MESSAGE, GENERAL_LIMIT_MESSAGE,
    SEARCH_LIMIT_MESSAGE,
};
use crate::state::AppState;
use axum::{middleware::from_fn_with_state, routing::get, Router};

/// Build the `/api` router. Each route carries its own limiter inside the
/// shared general ceiling.
pub fn api_router(limits: &RateLimits) -> Router<AppState> {
    let general = RateLimitState::new(limits.general, limits.window, GENERAL_LIMIT_MESSAGE);
    let search = RateLimitState::new(limits.search, limits.window, SEARCH_LIMIT_MESSAGE);
    let details = RateLimitState::new(limits.details, limits.window, DETAILS_LIMIT_MESSAGE);

    Router::new()
        .route(
            "/api/search",
            get(movies::search_movies).layer(from_fn_with_state(search, rate_limit_middleware)),
        )
        .route(
            "/api/details",
            get(movies::movie_details).layer(from_fn_with_state(details, rate_limit_middleware)),
        )
        .route_layer(from_fn_with_state(general, rate_limit_middleware))
}
