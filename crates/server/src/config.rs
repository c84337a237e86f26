use std::fmt;
use std::time::Duration;
use validator::Validate;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &["http://localhost", "http://127.0.0.1", "file://"];

/// Fixed-window request ceilings per client.
#[derive(Debug, Clone, PartialEq)]
pub struct RateLimits {
    pub window: Duration,
    /// Shared ceiling across every `/api` route.
    pub general: u32,
    pub search: u32,
    pub details: u32,
}

impl Default for RateLimits {
    fn default() -> Self {
        Self {
            window: Duration::from_secs(15 * 60),
            general: 100,
            search: 50,
            details: 200,
        }
    }
}

/// Proxy settings read from the environment (and `.env` when present).
#[derive(Debug, Clone, Validate)]
pub struct ProxyConfig {
    #[validate(length(min = 1, message = "OMDB_API_KEY must not be empty"))]
    pub api_key: String,
    #[validate(url(message = "OMDB_API_URL must be a valid URL"))]
    pub api_url: String,
    pub port: u16,
    /// Origin prefixes accepted by the CORS policy.
    pub allowed_origins: Vec<String>,
    #[validate(range(min = 1, max = 300, message = "UPSTREAM_TIMEOUT_SECS must be between 1 and 300"))]
    pub upstream_timeout_secs: u64,
    pub limits: RateLimits,
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { var: &'static str, value: String },
    Validation(validator::ValidationErrors),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(var) => write!(f, "{var} must be set"),
            ConfigError::Invalid { var, value } => write!(f, "{var} has an invalid value: {value:?}"),
            ConfigError::Validation(errors) => write!(f, "invalid configuration: {errors}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<validator::ValidationErrors> for ConfigError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ConfigError::Validation(errors)
    }
}

impl ProxyConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Missing .env is fine; production sets variables directly.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |var: &'static str| {
            lookup(var)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(var))
        };

        let api_key = required("OMDB_API_KEY")?;
        let api_url = required("OMDB_API_URL")?;
        let port = parse_or("PORT", lookup("PORT"), DEFAULT_PORT)?;
        let upstream_timeout_secs = parse_or(
            "UPSTREAM_TIMEOUT_SECS",
            lookup("UPSTREAM_TIMEOUT_SECS"),
            DEFAULT_UPSTREAM_TIMEOUT_SECS,
        )?;
        let allowed_origins = parse_origins(lookup("ALLOWED_ORIGINS").as_deref());

        let config = Self {
            api_key,
            api_url,
            port,
            allowed_origins,
            upstream_timeout_secs,
            limits: RateLimits::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }
}

fn parse_or<T: std::str::FromStr>(
    var: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
            var,
            value: value.to_string(),
        }),
    }
}

/// Split a comma list of origin prefixes. Unset or blank falls back to the
/// local development origins.
pub fn parse_origins(raw: Option<&str>) -> Vec<String> {
    let parsed: Vec<String> = raw
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect();

    if parsed.is_empty() {
        DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect()
    } else {
        parsed
    }
}
