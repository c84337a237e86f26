//! Rate-limiting proxy in front of an OMDb-compatible movie metadata API.
//! Keeps the API key server-side, validates input and throttles clients.

pub mod config;
pub mod cors;
pub mod health;
pub mod openapi;
pub mod rate_limit;
pub mod rest;
pub mod router;
pub mod state;
pub mod telemetry;
pub mod upstream;

pub use config::{ConfigError, ProxyConfig, RateLimits};
pub use router::build_router;
pub use state::AppState;
