//! Coordinate-source precedence.
//!
//! A record's position always comes from exactly one source: the summary's
//! embedded coordinates when present, otherwise the geocoder. The two are
//! never merged.

use pathfinder_core::location::{
    AudioCache, CoordinateSource, Coordinates, GeocodeRecord, LocationRecord, NarrationRecord,
    SummaryRecord,
};

/// The position chosen for a resolution, with the display name that goes
/// with it.
#[derive(Debug, Clone, PartialEq)]
pub struct ChosenPosition {
    /// Display name.
    pub name: String,
    /// Map position.
    pub coordinates: Coordinates,
    /// Which resolver supplied the position.
    pub source: CoordinateSource,
}

impl ChosenPosition {
    /// Takes the summary's own coordinates and title, if it has coordinates.
    #[must_use]
    pub fn from_summary(summary: &SummaryRecord) -> Option<Self> {
        summary.coordinates.map(|coordinates| Self {
            name: summary.title.clone(),
            coordinates,
            source: CoordinateSource::Summary,
        })
    }

    /// Takes the geocoder's coordinates and formatted address.
    #[must_use]
    pub fn from_geocode(record: GeocodeRecord) -> Self {
        Self {
            name: record.formatted_name,
            coordinates: record.coordinates,
            source: CoordinateSource::Geocoder,
        }
    }

    /// Assembles the final record.
    #[must_use]
    pub fn into_record(self, narration: NarrationRecord, summary: SummaryRecord) -> LocationRecord {
        LocationRecord {
            name: self.name,
            coordinates: self.coordinates,
            coordinate_source: self.source,
            narration_text: narration.text,
            audio: AudioCache::with_audio(narration.audio),
            summary,
        }
    }
}
