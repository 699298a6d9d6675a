//! Location resolution orchestrator.
//!
//! Steps run strictly in sequence and each resolver is called at most once:
//! summary, then (only when the summary has no coordinates) geocoding, then
//! narration. Narration never fails the resolution.

use std::sync::{Arc, Mutex};

use pathfinder_core::clock::Clock;
use pathfinder_core::error::{NotFoundKind, ResolutionError};
use pathfinder_core::location::LocationRecord;
use pathfinder_core::provider::{Geocoder, KnowledgeBase, NarrationService};
use pathfinder_core::rng::DeterministicRng;
use pathfinder_knowledge::application::{geocode_resolver, summary_resolver};
use pathfinder_narration::application::generator;
use pathfinder_narration::domain::request::{NarrationSubject, SEARCH_PATH_ID};
use tracing::{debug, info};

use crate::domain::position::ChosenPosition;

/// Collaborators needed to resolve a location.
#[derive(Clone)]
pub struct LocationServices {
    /// Encyclopedic knowledge base.
    pub knowledge: Arc<dyn KnowledgeBase>,
    /// Fallback geocoder.
    pub geocoder: Arc<dyn Geocoder>,
    /// Narration-generation service.
    pub narrator: Arc<dyn NarrationService>,
    /// Clock for request timestamps.
    pub clock: Arc<dyn Clock>,
    /// Random source for narrative-style selection.
    pub rng: Arc<Mutex<dyn DeterministicRng + Send>>,
}

impl std::fmt::Debug for LocationServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationServices").finish_non_exhaustive()
    }
}

/// Resolves a free-text query into a display-ready record.
///
/// # Errors
///
/// Returns `ResolutionError::NotFound(Location)` if no summary exists, and
/// `ResolutionError::NotFound(Coordinates)` if neither the summary nor the
/// geocoder yields coordinates.
pub async fn resolve_location(
    query: &str,
    services: &LocationServices,
) -> Result<LocationRecord, ResolutionError> {
    resolve_location_on_path(query, SEARCH_PATH_ID, services).await
}

/// Resolves `query` on behalf of a tour (or free search when `path_id` is
/// `SEARCH_PATH_ID`). The path id is forwarded to the narration service.
///
/// # Errors
///
/// See [`resolve_location`].
pub async fn resolve_location_on_path(
    query: &str,
    path_id: &str,
    services: &LocationServices,
) -> Result<LocationRecord, ResolutionError> {
    let Some(summary) = summary_resolver::get_summary(query, &*services.knowledge).await else {
        return Err(ResolutionError::NotFound(NotFoundKind::Location));
    };

    let position = match ChosenPosition::from_summary(&summary) {
        Some(position) => {
            debug!(query, title = %summary.title, "using summary coordinates");
            position
        }
        None => {
            let Some(geocoded) = geocode_resolver::geocode(query, &*services.geocoder).await else {
                return Err(ResolutionError::NotFound(NotFoundKind::Coordinates));
            };
            debug!(query, name = %geocoded.formatted_name, "using geocoded coordinates");
            ChosenPosition::from_geocode(geocoded)
        }
    };

    let subject = NarrationSubject {
        name: &position.name,
        extract: &summary.extract,
        page_identifier: Some(&summary.title),
        path_id,
    };
    let narration = generator::generate_narration(
        &subject,
        &*services.narrator,
        services.clock.as_ref(),
        &services.rng,
    )
    .await;

    info!(
        query,
        name = %position.name,
        lat = position.coordinates.lat,
        lng = position.coordinates.lng,
        source = ?position.source,
        "location resolved"
    );

    Ok(position.into_record(narration, summary))
}
