use serde_json::Value;
use shared_types::AppError;
use std::fmt;
use std::time::Duration;

pub const REQUEST_TIMEOUT_MESSAGE: &str = "Request timeout. Please try again.";

/// Failure talking to the metadata API.
#[derive(Debug)]
pub enum UpstreamError {
    Timeout,
    Transport(String),
    Status(u16),
    Decode(String),
}

impl UpstreamError {
    fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout
        } else if err.is_decode() {
            UpstreamError::Decode(err.to_string())
        } else {
            UpstreamError::Transport(err.to_string())
        }
    }

    /// Timeouts keep their own message and status; everything else becomes
    /// the caller's generic failure text.
    pub fn into_app_error(self, failure_message: &str) -> AppError {
        match self {
            UpstreamError::Timeout => AppError::timeout(REQUEST_TIMEOUT_MESSAGE),
            _ => AppError::upstream(failure_message),
        }
    }
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamError::Timeout => write!(f, "upstream request timed out"),
            UpstreamError::Transport(msg) => write!(f, "upstream transport error: {msg}"),
            UpstreamError::Status(status) => write!(f, "upstream responded with status {status}"),
            UpstreamError::Decode(msg) => write!(f, "upstream body was not JSON: {msg}"),
        }
    }
}

impl std::error::Error for UpstreamError {}

/// Client for the OMDb-shaped metadata API. Holds the API key so it never
/// leaves the proxy.
#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl fmt::Debug for UpstreamClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl UpstreamClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(UpstreamError::from_reqwest)?;
        Ok(Self {
            http,
            endpoint: format!("{}/", base_url.trim_end_matches('/')),
            api_key: api_key.to_string(),
        })
    }

    /// Title search; the payload is returned exactly as the upstream sent it.
    #[tracing::instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Value, UpstreamError> {
        self.fetch("s", query).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn details(&self, external_id: &str) -> Result<Value, UpstreamError> {
        self.fetch("i", external_id).await
    }

    async fn fetch(&self, param: &str, value: &str) -> Result<Value, UpstreamError> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("apikey", self.api_key.as_str()), (param, value)])
            .send()
            .await
            .map_err(UpstreamError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "upstream returned non-success status");
            return Err(UpstreamError::Status(status.as_u16()));
        }

        response.json::<Value>().await.map_err(UpstreamError::from_reqwest)
    }
}
