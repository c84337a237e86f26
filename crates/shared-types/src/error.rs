use crate::movie::ErrorEnvelope;
use crate::validation::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorization of application errors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum AppErrorKind {
    /// Bad query or identifier; never reaches the network.
    Validation,
    /// The upstream call exceeded its time bound.
    Timeout,
    /// The upstream answered with a non-success status or an unreadable body.
    Upstream,
    /// Transport failure reaching the proxy or the upstream.
    Network,
    RateLimited,
    Forbidden,
}

impl fmt::Display for AppErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppErrorKind::Validation => write!(f, "Validation"),
            AppErrorKind::Timeout => write!(f, "Timeout"),
            AppErrorKind::Upstream => write!(f, "Upstream"),
            AppErrorKind::Network => write!(f, "Network"),
            AppErrorKind::RateLimited => write!(f, "RateLimited"),
            AppErrorKind::Forbidden => write!(f, "Forbidden"),
        }
    }
}

/// Structured application error used across server and client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AppError {
    pub kind: AppErrorKind,
    pub message: String,
}

impl AppError {
    fn new(kind: AppErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::Validation, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::Timeout, message)
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::Upstream, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::Network, message)
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::RateLimited, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::Forbidden, message)
    }

    /// Rebuild an error from a non-success proxy response (client-side).
    ///
    /// The kind comes from the status code; the message from the
    /// `{"Response":"False","Error":...}` envelope when the body holds one.
    pub fn from_response(status: u16, body: &str) -> Self {
        let kind = match status {
            400 | 422 => AppErrorKind::Validation,
            403 => AppErrorKind::Forbidden,
            429 => AppErrorKind::RateLimited,
            504 | 408 => AppErrorKind::Timeout,
            _ => AppErrorKind::Upstream,
        };
        let message = Self::envelope_message(body)
            .unwrap_or_else(|| format!("Proxy responded with status {status}"));
        Self::new(kind, message)
    }

    /// Extract the `Error` text from an error envelope body.
    pub fn envelope_message(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorEnvelope>(body)
            .ok()
            .map(|envelope| envelope.error)
    }

    #[cfg_attr(not(feature = "server"), allow(dead_code))]
    fn status_code_u16(&self) -> u16 {
        match self.kind {
            AppErrorKind::Validation => 400,
            AppErrorKind::Timeout => 504,
            AppErrorKind::Upstream => 500,
            AppErrorKind::Network => 500,
            AppErrorKind::RateLimited => 429,
            AppErrorKind::Forbidden => 403,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for AppError {}

impl From<ValidationError> for AppError {
    fn from(error: ValidationError) -> Self {
        AppError::validation(error.message())
    }
}

#[cfg(feature = "server")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = axum::http::StatusCode::from_u16(self.status_code_u16())
            .unwrap_or(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        (status, axum::Json(ErrorEnvelope::new(self.message))).into_response()
    }
}
