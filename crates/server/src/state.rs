use crate::config::ProxyConfig;
use crate::upstream::{UpstreamClient, UpstreamError};
use axum::extract::FromRef;
use std::sync::Arc;

/// Shared application state passed to Axum handlers via `State`.
/// Derives `FromRef` so handlers can extract `State<UpstreamClient>` directly.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub upstream: UpstreamClient,
    pub config: Arc<ProxyConfig>,
}

impl AppState {
    pub fn from_config(config: ProxyConfig) -> Result<Self, UpstreamError> {
        let upstream =
            UpstreamClient::new(&config.api_url, &config.api_key, config.upstream_timeout())?;
        Ok(Self {
            upstream,
            config: Arc::new(config),
        })
    }
}
