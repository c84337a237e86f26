use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Upstream placeholder meaning "this field has no data".
pub const ABSENT_SENTINEL: &str = "N/A";

/// Returns the value only when it carries real data.
///
/// Missing fields, empty or whitespace-only strings and the `"N/A"` sentinel
/// are all treated as absent.
pub fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| {
        let trimmed = v.trim();
        !trimmed.is_empty() && trimmed != ABSENT_SENTINEL
    })
}

// ---------------------------------------------------------------------------
// Response flag
// ---------------------------------------------------------------------------

/// The upstream encodes success as the strings `"True"` / `"False"`.
pub mod response_flag {
    use super::*;

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "True" } else { "False" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.is_some_and(|s| s.eq_ignore_ascii_case("true")))
    }
}

// ---------------------------------------------------------------------------
// Search results
// ---------------------------------------------------------------------------

/// Kind of media a search hit refers to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Movie,
    Series,
    Episode,
    /// Any other upstream label, kept verbatim for display.
    Other(String),
}

impl MediaKind {
    pub fn as_str(&self) -> &str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Series => "series",
            MediaKind::Episode => "episode",
            MediaKind::Other(label) => label,
        }
    }
}

impl From<String> for MediaKind {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "movie" => MediaKind::Movie,
            "series" => MediaKind::Series,
            "episode" => MediaKind::Episode,
            _ => MediaKind::Other(value),
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for MediaKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MediaKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(MediaKind::from)
    }
}

/// Poster reference on a search hit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Poster {
    Url(String),
    /// The upstream sent the absent sentinel or nothing at all.
    #[default]
    Missing,
}

impl Poster {
    pub fn url(&self) -> Option<&str> {
        match self {
            Poster::Url(url) => Some(url),
            Poster::Missing => None,
        }
    }
}

impl From<Option<String>> for Poster {
    fn from(value: Option<String>) -> Self {
        match present(value.as_deref()) {
            Some(url) => Poster::Url(url.trim().to_string()),
            None => Poster::Missing,
        }
    }
}

impl Serialize for Poster {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.url().unwrap_or(ABSENT_SENTINEL))
    }
}

impl<'de> Deserialize<'de> for Poster {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<String>::deserialize(deserializer).map(Poster::from)
    }
}

/// One hit of a title search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SearchResultItem {
    #[serde(rename = "imdbID")]
    pub external_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Type")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "movie"))]
    pub kind: MediaKind,
    #[serde(rename = "Poster", default)]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "N/A"))]
    pub poster: Poster,
}

/// Envelope returned by `GET /api/search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SearchResponse {
    #[serde(rename = "Response", with = "response_flag", default)]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "True"))]
    pub ok: bool,
    #[serde(rename = "Search", default)]
    pub items: Vec<SearchResultItem>,
    #[serde(
        rename = "totalResults",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub total_results: Option<String>,
    #[serde(rename = "Error", default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchResponse {
    /// A well-formed response with zero matches. Not an error.
    pub fn is_empty_result(&self) -> bool {
        !self.ok || self.items.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Detail records
// ---------------------------------------------------------------------------

/// Full record returned by `GET /api/details`.
///
/// Every field is optional; use [`DetailRecord::get`] which folds the
/// absent sentinel into `None`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DetailRecord {
    #[serde(rename = "imdbID", default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(rename = "Title", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "Year", default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(rename = "Rated", default, skip_serializing_if = "Option::is_none")]
    pub rated: Option<String>,
    #[serde(rename = "Released", default, skip_serializing_if = "Option::is_none")]
    pub released: Option<String>,
    #[serde(rename = "Runtime", default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    #[serde(rename = "Genre", default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(rename = "Director", default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(rename = "Writer", default, skip_serializing_if = "Option::is_none")]
    pub writer: Option<String>,
    #[serde(rename = "Actors", default, skip_serializing_if = "Option::is_none")]
    pub actors: Option<String>,
    #[serde(rename = "Plot", default, skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
    #[serde(rename = "Language", default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(rename = "Country", default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(rename = "Awards", default, skip_serializing_if = "Option::is_none")]
    pub awards: Option<String>,
    #[serde(rename = "Poster", default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(rename = "imdbRating", default, skip_serializing_if = "Option::is_none")]
    pub imdb_rating: Option<String>,
    #[serde(rename = "imdbVotes", default, skip_serializing_if = "Option::is_none")]
    pub imdb_votes: Option<String>,
    #[serde(rename = "BoxOffice", default, skip_serializing_if = "Option::is_none")]
    pub box_office: Option<String>,
    #[serde(rename = "Response", with = "response_flag", default)]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "True"))]
    pub ok: bool,
    #[serde(rename = "Error", default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Displayable fields of a [`DetailRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailField {
    Title,
    Year,
    Rated,
    Released,
    Runtime,
    Genre,
    Director,
    Writer,
    Actors,
    Plot,
    Language,
    Country,
    Awards,
    Poster,
    ImdbRating,
    ImdbVotes,
    BoxOffice,
}

impl DetailField {
    /// Human-readable label, without the trailing colon.
    pub fn label(self) -> &'static str {
        match self {
            DetailField::Title => "Title",
            DetailField::Year => "Year",
            DetailField::Rated => "Rated",
            DetailField::Released => "Released",
            DetailField::Runtime => "Runtime",
            DetailField::Genre => "Genre",
            DetailField::Director => "Director",
            DetailField::Writer => "Writer",
            DetailField::Actors => "Actors",
            DetailField::Plot => "Plot",
            DetailField::Language => "Language",
            DetailField::Country => "Country",
            DetailField::Awards => "Awards",
            DetailField::Poster => "Poster",
            DetailField::ImdbRating => "IMDB Rating",
            DetailField::ImdbVotes => "IMDB Votes",
            DetailField::BoxOffice => "Box Office",
        }
    }
}

impl DetailRecord {
    fn raw(&self, field: DetailField) -> Option<&str> {
        let value = match field {
            DetailField::Title => &self.title,
            DetailField::Year => &self.year,
            DetailField::Rated => &self.rated,
            DetailField::Released => &self.released,
            DetailField::Runtime => &self.runtime,
            DetailField::Genre => &self.genre,
            DetailField::Director => &self.director,
            DetailField::Writer => &self.writer,
            DetailField::Actors => &self.actors,
            DetailField::Plot => &self.plot,
            DetailField::Language => &self.language,
            DetailField::Country => &self.country,
            DetailField::Awards => &self.awards,
            DetailField::Poster => &self.poster,
            DetailField::ImdbRating => &self.imdb_rating,
            DetailField::ImdbVotes => &self.imdb_votes,
            DetailField::BoxOffice => &self.box_office,
        };
        value.as_deref()
    }

    /// Value of `field` if it carries data.
    pub fn get(&self, field: DetailField) -> Option<&str> {
        present(self.raw(field))
    }

    #[cfg(test)]
    pub(crate) fn has_any(&self, fields: &[DetailField]) -> bool {
        fields.iter().any(|f| self.get(*f).is_some())
    }
}

// ---------------------------------------------------------------------------
// Error envelope
// ---------------------------------------------------------------------------

/// Body of every failed proxy response: `{"Response":"False","Error":"..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorEnvelope {
    #[serde(rename = "Response", with = "response_flag", default)]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "False"))]
    pub ok: bool,
    #[serde(rename = "Error")]
    pub error: String,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
        }
    }
}
