use crate::timers::Millis;
use shared_types::{AppError, DetailRecord};
use std::collections::HashMap;

/// Text shown in a details surface when the record could not be loaded.
pub const DETAILS_FAILED: &str = "Failed to load details";

/// Outcome handed to a details surface.
#[derive(Debug, Clone, PartialEq)]
pub enum Details {
    Loaded(DetailRecord),
    /// Error-shaped record; rendered through the same formatting path.
    Failed(String),
}

impl Details {
    pub fn title(&self) -> Option<&str> {
        match self {
            Details::Loaded(record) => record.get(shared_types::DetailField::Title),
            Details::Failed(_) => None,
        }
    }
}

/// Result of a cache lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    /// Served from the cache; no network call.
    Ready(Details),
    /// Caller must fetch and report back through [`DetailsCache::complete`].
    Fetch,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    record: DetailRecord,
    stored_at: Millis,
}

/// Successful detail lookups keyed by external id.
///
/// Only `Response: "True"` records are stored, so failed lookups always
/// re-fetch. Entries never expire unless a TTL is configured.
#[derive(Debug, Clone, Default)]
pub struct DetailsCache {
    entries: HashMap<String, CacheEntry>,
    ttl: Option<Millis>,
}

impl DetailsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Option<Millis>) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    pub fn get_or_fetch(&mut self, id: &str, now: Millis) -> Lookup {
        if let (Some(ttl), Some(entry)) = (self.ttl, self.entries.get(id)) {
            if now.saturating_sub(entry.stored_at) >= ttl {
                tracing::debug!(id, "details cache entry expired");
                self.entries.remove(id);
            }
        }

        match self.entries.get(id) {
            Some(entry) => Lookup::Ready(Details::Loaded(entry.record.clone())),
            None => Lookup::Fetch,
        }
    }

    /// Record the outcome of a fetch issued after [`Lookup::Fetch`].
    pub fn complete(
        &mut self,
        id: &str,
        outcome: Result<DetailRecord, AppError>,
        now: Millis,
    ) -> Details {
        match outcome {
            Ok(record) if record.ok => {
                self.entries.insert(
                    id.to_string(),
                    CacheEntry {
                        record: record.clone(),
                        stored_at: now,
                    },
                );
                Details::Loaded(record)
            }
            Ok(record) => {
                tracing::warn!(
                    id,
                    error = record.error.as_deref().unwrap_or("unknown"),
                    "details lookup returned a failure response"
                );
                Details::Failed(DETAILS_FAILED.to_string())
            }
            Err(error) => {
                tracing::warn!(id, %error, "details fetch failed");
                Details::Failed(DETAILS_FAILED.to_string())
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
