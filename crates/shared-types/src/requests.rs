use serde::{Deserialize, Serialize};

/// Query string of `GET /api/search`.
///
/// `s` stays optional so a missing parameter reaches validation and yields
/// the same 400 envelope as an empty one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct SearchParams {
    /// Title search text, 3 to 100 characters after trimming.
    #[serde(default)]
    pub s: Option<String>,
}

/// Query string of `GET /api/details`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct DetailsParams {
    /// External identifier, `tt` followed by digits.
    #[serde(default)]
    pub i: Option<String>,
}
