//! Bounded panorama lookup.

use pathfinder_core::error::ProviderError;
use pathfinder_core::location::Coordinates;
use pathfinder_core::provider::{ImageryProvider, Panorama};
use tracing::{debug, warn};

use crate::domain::availability::{ImagerySettings, PanoramaAvailability, UnavailableReason};

/// Waits for `provider` to be ready, then looks up the panorama nearest
/// `at`. Both steps share one deadline; missing it yields
/// `Unavailable { reason: TimedOut }` instead of waiting forever.
pub async fn await_panorama(
    provider: &dyn ImageryProvider,
    at: Coordinates,
    settings: ImagerySettings,
) -> PanoramaAvailability {
    let lookup = find_when_ready(provider, at, settings.radius_meters);

    match tokio::time::timeout(settings.timeout, lookup).await {
        Ok(Ok(panorama)) => {
            debug!(pano_id = %panorama.pano_id, lat = at.lat, lng = at.lng, "panorama available");
            PanoramaAvailability::Available { panorama }
        }
        Ok(Err(ProviderError::NotFound | ProviderError::Rejected(_))) => {
            debug!(lat = at.lat, lng = at.lng, "no panorama near location");
            PanoramaAvailability::unavailable(UnavailableReason::NoImagery, at)
        }
        Ok(Err(err)) => {
            warn!(error = %err, "imagery provider failed");
            PanoramaAvailability::unavailable(UnavailableReason::ProviderError, at)
        }
        Err(_elapsed) => {
            warn!(timeout_ms = settings.timeout.as_millis(), "imagery provider timed out");
            PanoramaAvailability::unavailable(UnavailableReason::TimedOut, at)
        }
    }
}

async fn find_when_ready(
    provider: &dyn ImageryProvider,
    at: Coordinates,
    radius_meters: u32,
) -> Result<Panorama, ProviderError> {
    provider.ready().await?;
    provider.panorama(at, radius_meters).await
}
