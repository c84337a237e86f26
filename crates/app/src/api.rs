use serde::de::DeserializeOwned;
use shared_types::{AppError, DetailRecord, SearchResponse};

/// Proxy location used when `PROXY_BASE_URL` was not set at build time.
pub const DEFAULT_PROXY_BASE_URL: &str = "http://localhost:3000";

/// HTTP client for the movie proxy.
#[derive(Clone)]
pub struct ProxyClient {
    http: reqwest::Client,
    base_url: String,
}

impl ProxyClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_build_env() -> Self {
        Self::new(option_env!("PROXY_BASE_URL").unwrap_or(DEFAULT_PROXY_BASE_URL))
    }

    pub async fn search(&self, query: &str) -> Result<SearchResponse, AppError> {
        self.get_json("/api/search", ("s", query)).await
    }

    pub async fn details(&self, external_id: &str) -> Result<DetailRecord, AppError> {
        self.get_json("/api/details", ("i", external_id)).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        param: (&str, &str),
    ) -> Result<T, AppError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .query(&[param])
            .send()
            .await
            .map_err(|err| {
                tracing::error!(error = %err, %url, "proxy unreachable");
                AppError::network(err.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| AppError::network(err.to_string()))?;

        if !status.is_success() {
            let err = AppError::from_response(status.as_u16(), &body);
            tracing::warn!(status = status.as_u16(), error = %err, "proxy returned an error");
            return Err(err);
        }

        serde_json::from_str(&body).map_err(|err| {
            tracing::error!(error = %err, "proxy returned an unreadable body");
            AppError::upstream(format!("Unreadable response: {err}"))
        })
    }
}
