//! Geocode Resolver.

use pathfinder_core::location::GeocodeRecord;
use pathfinder_core::provider::Geocoder;
use tracing::warn;

/// Geocodes `query` with a single provider request.
///
/// Any provider failure (non-`OK` status, transport error, malformed body)
/// is logged and reported as `None`. No retry, no backoff.
pub async fn geocode(query: &str, geocoder: &dyn Geocoder) -> Option<GeocodeRecord> {
    match geocoder.geocode(query).await {
        Ok(record) => Some(record),
        Err(err) => {
            warn!(query, error = %err, "geocoding failed");
            None
        }
    }
}
