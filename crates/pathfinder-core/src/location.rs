//! Location data model shared by every bounded context.

use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Prefix marking a query as a guided-tour reference.
pub const TOUR_QUERY_PREFIX: &str = "tour:";

/// A point on the map in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
}

impl Coordinates {
    /// Creates a new coordinate pair.
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Kind of knowledge-base page a summary was taken from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    /// A regular article.
    #[default]
    Standard,
    /// A page listing several meanings of the title.
    Disambiguation,
}

/// Encyclopedic summary of a place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    /// Canonical page title.
    pub title: String,
    /// Plain-text extract.
    pub extract: String,
    /// Short description line, when the knowledge base has one.
    pub description: Option<String>,
    /// Coordinates embedded in the article, if any.
    pub coordinates: Option<Coordinates>,
    /// Thumbnail image URL.
    pub thumbnail_url: Option<String>,
    /// Canonical page URL for "read more" links.
    pub page_url: String,
    /// Page kind.
    #[serde(default)]
    pub kind: PageKind,
}

/// A keyword search hit returned by the knowledge base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Page title.
    pub title: String,
    /// Matching snippet; may contain inline highlight markup.
    pub snippet: String,
}

/// Result of a geocoding lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeRecord {
    /// Geocoded position.
    pub coordinates: Coordinates,
    /// Provider-formatted address.
    pub formatted_name: String,
}

/// Narration produced for a location.
#[derive(Debug, Clone, PartialEq)]
pub struct NarrationRecord {
    /// Narration text; never empty.
    pub text: String,
    /// Pre-synthesized audio. `None` means synthesis happens at play time.
    pub audio: Option<Vec<u8>>,
}

/// Where a location's coordinates came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateSource {
    /// Embedded in the encyclopedic summary.
    Summary,
    /// Supplied by the geocoder because the summary had none.
    Geocoder,
}

/// Memoization slot for a location's narration audio.
///
/// Clones share the same slot. Writes are last-write-wins.
#[derive(Debug, Clone, Default)]
pub struct AudioCache(Arc<RwLock<Option<Arc<[u8]>>>>);

impl AudioCache {
    /// Creates a slot pre-filled with `audio`.
    #[must_use]
    pub fn with_audio(audio: Option<Vec<u8>>) -> Self {
        Self(Arc::new(RwLock::new(audio.map(Arc::from))))
    }

    /// Returns the cached bytes, if any.
    #[must_use]
    pub fn get(&self) -> Option<Arc<[u8]>> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Stores `audio`, replacing whatever was cached.
    pub fn store(&self, audio: Arc<[u8]>) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = Some(audio);
    }

    /// Whether audio has been cached.
    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

/// The assembled, display-ready result of one resolution.
#[derive(Debug, Clone)]
pub struct LocationRecord {
    /// Display name.
    pub name: String,
    /// Map position.
    pub coordinates: Coordinates,
    /// Which resolver supplied `coordinates`.
    pub coordinate_source: CoordinateSource,
    /// Narration text.
    pub narration_text: String,
    /// Narration audio memo slot.
    pub audio: AudioCache,
    /// The full summary the record was built from.
    pub summary: SummaryRecord,
}

impl LocationRecord {
    /// Link to the location on Google Maps.
    #[must_use]
    pub fn maps_url(&self) -> String {
        maps_url(self.coordinates)
    }
}

/// Builds the "View on Maps" link for `at`.
#[must_use]
pub fn maps_url(at: Coordinates) -> String {
    format!("https://www.google.com/maps/@{},{},15z", at.lat, at.lng)
}

/// A parsed user query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Free-text place search.
    Text(String),
    /// Reference to a guided tour by id.
    Tour(String),
}

impl Query {
    /// Parses raw user input.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the input is empty after trimming.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Validation("query must not be empty".to_owned()));
        }
        match trimmed.strip_prefix(TOUR_QUERY_PREFIX) {
            Some(id) if !id.trim().is_empty() => Ok(Self::Tour(id.trim().to_owned())),
            _ => Ok(Self::Text(trimmed.to_owned())),
        }
    }

    /// The query text as typed (tour references keep their prefix).
    #[must_use]
    pub fn as_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Tour(id) => format!("{TOUR_QUERY_PREFIX}{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejects_blank_query() {
        assert!(matches!(
            Query::parse("   "),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_parse_trims_free_text() {
        assert_eq!(
            Query::parse("  Colosseum, Rome, Italy ").unwrap(),
            Query::Text("Colosseum, Rome, Italy".to_owned())
        );
    }

    #[test]
    fn test_parse_recognizes_tour_reference() {
        assert_eq!(
            Query::parse("tour:stations-of-the-cross").unwrap(),
            Query::Tour("stations-of-the-cross".to_owned())
        );
    }

    #[test]
    fn test_parse_treats_bare_prefix_as_text() {
        assert_eq!(Query::parse("tour:").unwrap(), Query::Text("tour:".to_owned()));
    }

    #[test]
    fn test_audio_cache_is_shared_between_clones() {
        let cache = AudioCache::default();
        let clone = cache.clone();

        clone.store(Arc::from(vec![1_u8, 2, 3]));

        assert!(cache.is_filled());
        assert_eq!(cache.get().as_deref(), Some(&[1_u8, 2, 3][..]));
    }

    #[test]
    fn test_maps_url_formats_coordinates() {
        assert_eq!(
            maps_url(Coordinates::new(41.8902, 12.4922)),
            "https://www.google.com/maps/@41.8902,12.4922,15z"
        );
    }
}
