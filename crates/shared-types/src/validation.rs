use regex::{Regex, RegexSet};
use std::fmt;
use std::sync::LazyLock;

pub const MIN_QUERY_CHARS: usize = 3;
pub const MAX_QUERY_CHARS: usize = 100;
pub const MAX_EXTERNAL_ID_CHARS: usize = 20;

/// Markup and script-injection fragments rejected in search queries.
static DENYLIST: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"(?i)<script",
        r"(?i)javascript:",
        r"(?i)on[0-9a-z_]+\s*=",
        r"(?i)<iframe",
        r"(?i)<object",
        r"(?i)<embed",
    ])
    .expect("denylist patterns are valid")
});

static EXTERNAL_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^tt[0-9]+$").expect("id pattern is valid"));

/// Category of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    InvalidInput,
    TooShort,
    TooLong,
    UnsafeContent,
    BadFormat,
}

/// Rejection of a search query or external identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    InvalidQuery,
    QueryTooShort,
    QueryTooLong,
    UnsafeQuery,
    InvalidId,
    BadIdFormat,
    IdTooLong,
}

impl ValidationError {
    pub fn kind(&self) -> ValidationKind {
        match self {
            ValidationError::InvalidQuery | ValidationError::InvalidId => {
                ValidationKind::InvalidInput
            }
            ValidationError::QueryTooShort => ValidationKind::TooShort,
            ValidationError::QueryTooLong | ValidationError::IdTooLong => ValidationKind::TooLong,
            ValidationError::UnsafeQuery => ValidationKind::UnsafeContent,
            ValidationError::BadIdFormat => ValidationKind::BadFormat,
        }
    }

    /// The user-facing message returned in error envelopes.
    pub fn message(&self) -> &'static str {
        match self {
            ValidationError::InvalidQuery => "Invalid search query",
            ValidationError::QueryTooShort => "Search query must be at least 3 characters",
            ValidationError::QueryTooLong => "Search query must be no more than 100 characters",
            ValidationError::UnsafeQuery => "Invalid characters in search query",
            ValidationError::InvalidId => "Invalid IMDB ID",
            ValidationError::BadIdFormat => "Invalid IMDB ID format",
            ValidationError::IdTooLong => "IMDB ID is too long",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ValidationError {}

/// Check a raw search query and return it trimmed.
///
/// A missing or empty value is `InvalidQuery`; a whitespace-only value trims
/// to nothing and is therefore `QueryTooShort`. Lengths count characters.
pub fn validate_search_query(raw: Option<&str>) -> Result<String, ValidationError> {
    let raw = match raw {
        Some(value) if !value.is_empty() => value,
        _ => return Err(ValidationError::InvalidQuery),
    };

    let trimmed = raw.trim();
    let len = trimmed.chars().count();

    if len < MIN_QUERY_CHARS {
        return Err(ValidationError::QueryTooShort);
    }
    if len > MAX_QUERY_CHARS {
        return Err(ValidationError::QueryTooLong);
    }
    if DENYLIST.is_match(trimmed) {
        return Err(ValidationError::UnsafeQuery);
    }

    Ok(trimmed.to_string())
}

/// Check a raw external identifier (`tt` followed by digits) and return it trimmed.
pub fn validate_external_id(raw: Option<&str>) -> Result<String, ValidationError> {
    let raw = match raw {
        Some(value) if !value.is_empty() => value,
        _ => return Err(ValidationError::InvalidId),
    };

    let trimmed = raw.trim();

    if !EXTERNAL_ID.is_match(trimmed) {
        return Err(ValidationError::BadIdFormat);
    }
    if trimmed.len() > MAX_EXTERNAL_ID_CHARS {
        return Err(ValidationError::IdTooLong);
    }

    Ok(trimmed.to_string())
}
