//! Panorama availability.

use std::time::Duration;

use pathfinder_core::location::{Coordinates, maps_url};
use pathfinder_core::provider::Panorama;
use serde::Serialize;

/// Default search radius around a location.
pub const DEFAULT_RADIUS_METERS: u32 = 100;

/// Default bound on provider readiness plus lookup.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Why no panorama is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableReason {
    /// No imagery within the search radius.
    NoImagery,
    /// The provider did not become ready in time.
    TimedOut,
    /// The provider failed or is not configured.
    ProviderError,
}

/// Terminal outcome of a panorama lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PanoramaAvailability {
    /// Imagery can be rendered.
    Available {
        /// The panorama to render.
        panorama: Panorama,
    },
    /// No imagery; the front end offers the map link instead.
    Unavailable {
        /// Why.
        reason: UnavailableReason,
        /// "View on Maps" link for the location.
        maps_url: String,
    },
}

impl PanoramaAvailability {
    pub(crate) fn unavailable(reason: UnavailableReason, at: Coordinates) -> Self {
        Self::Unavailable {
            reason,
            maps_url: maps_url(at),
        }
    }

    /// Whether a panorama was found.
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available { .. })
    }
}

/// Lookup parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImagerySettings {
    /// Search radius in meters.
    pub radius_meters: u32,
    /// Bound on readiness plus lookup.
    pub timeout: Duration,
}

impl Default for ImagerySettings {
    fn default() -> Self {
        Self {
            radius_meters: DEFAULT_RADIUS_METERS,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
