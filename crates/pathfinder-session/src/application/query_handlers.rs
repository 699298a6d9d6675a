//! Query handlers for the Explorer Session context.
//!
//! Read-only view DTOs of a session, plus the panorama lookup for the
//! displayed location.

use std::sync::Arc;

use pathfinder_core::error::DomainError;
use pathfinder_core::location::{CoordinateSource, Coordinates, LocationRecord, SummaryRecord};
use pathfinder_imagery::application::panorama::await_panorama;
use pathfinder_imagery::domain::availability::PanoramaAvailability;
use pathfinder_playback::domain::state::{PlaybackPath, PlaybackState};
use pathfinder_playback::infrastructure::cue_backend::PlaybackCue;
use pathfinder_tours::domain::progress::{StopStatus, TourProgress};
use serde::Serialize;
use uuid::Uuid;

use super::context::ExplorerContext;
use crate::domain::explorer::{ExplorerSession, ExplorerView};
use crate::infrastructure::session_store::{SessionStore, lock};

/// Read-only view of an explorer session.
#[derive(Debug, Serialize)]
pub struct SessionView {
    /// Session identifier.
    pub session_id: Uuid,
    /// Current screen.
    pub view: ExplorerView,
    /// Whether a resolution is in flight.
    pub loading: bool,
    /// Dismissible error message.
    pub error: Option<String>,
    /// Displayed location.
    pub location: Option<LocationView>,
    /// Active tour.
    pub tour: Option<TourProgressView>,
    /// Narration playback.
    pub playback: PlaybackView,
}

/// The displayed location.
#[derive(Debug, Serialize)]
pub struct LocationView {
    /// Display name.
    pub name: String,
    /// Where it is.
    pub coordinates: Coordinates,
    /// Which resolver supplied the coordinates.
    pub coordinate_source: CoordinateSource,
    /// Narration text.
    pub narration_text: String,
    /// Whether narration audio is cached.
    pub audio_cached: bool,
    /// "View on Maps" link.
    pub maps_url: String,
    /// Encyclopedic summary.
    pub summary: SummaryRecord,
}

impl From<&LocationRecord> for LocationView {
    fn from(record: &LocationRecord) -> Self {
        Self {
            name: record.name.clone(),
            coordinates: record.coordinates,
            coordinate_source: record.coordinate_source,
            narration_text: record.narration_text.clone(),
            audio_cached: record.audio.is_filled(),
            maps_url: record.maps_url(),
            summary: record.summary.clone(),
        }
    }
}

/// Progress through the active tour.
#[derive(Debug, Serialize)]
pub struct TourProgressView {
    /// Tour identifier.
    pub tour_id: String,
    /// Tour name.
    pub tour_name: String,
    /// Tour icon.
    pub icon: String,
    /// Zero-based current index.
    pub current_index: usize,
    /// One-based stop number.
    pub stop_number: usize,
    /// Number of stops.
    pub total_stops: usize,
    /// Share of stops reached, in percent.
    pub percent_complete: f64,
    /// Previous stop index, absent on the first stop.
    pub previous: Option<usize>,
    /// Next stop index, absent on the last stop.
    pub next: Option<usize>,
    /// All stops with their status.
    pub stops: Vec<StopView>,
}

/// One stop in the tour panel.
#[derive(Debug, Serialize)]
pub struct StopView {
    /// Stop index.
    pub index: usize,
    /// Stop name.
    pub name: String,
    /// Stop description.
    pub description: String,
    /// Relative to the current stop.
    pub status: StopStatus,
}

impl From<&TourProgress> for TourProgressView {
    fn from(progress: &TourProgress) -> Self {
        let tour = progress.tour();
        Self {
            tour_id: tour.id.clone(),
            tour_name: tour.name.clone(),
            icon: tour.icon.clone(),
            current_index: progress.current_index(),
            stop_number: progress.current_index() + 1,
            total_stops: tour.stops.len(),
            percent_complete: progress.percent_complete(),
            previous: progress.previous(),
            next: progress.next(),
            stops: tour
                .stops
                .iter()
                .enumerate()
                .map(|(index, stop)| StopView {
                    index,
                    name: stop.name.clone(),
                    description: stop.description.clone(),
                    status: progress.status_of(index),
                })
                .collect(),
        }
    }
}

/// Playback state plus the cue for the front end's media element.
#[derive(Debug, Serialize)]
pub struct PlaybackView {
    /// Controller state.
    pub state: PlaybackState,
    /// Output path while playing or paused.
    pub path: Option<PlaybackPath>,
    /// Latest media cue.
    pub cue: PlaybackCue,
}

/// Builds the view of `session`.
#[must_use]
pub fn view_of(session: &ExplorerSession) -> SessionView {
    SessionView {
        session_id: session.id(),
        view: session.view(),
        loading: session.is_loading(),
        error: session.error().map(str::to_owned),
        location: session.location().map(|record| LocationView::from(record.as_ref())),
        tour: session.tour().map(TourProgressView::from),
        playback: playback_of(session),
    }
}

fn playback_of(session: &ExplorerSession) -> PlaybackView {
    PlaybackView {
        state: session.playback().state(),
        path: session.playback().path(),
        cue: session.cues().latest_cue(),
    }
}

/// Retrieves a session view.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` for an unknown session.
pub fn get_session_view(session_id: Uuid, store: &SessionStore) -> Result<SessionView, DomainError> {
    let handle = store.get(session_id)?;
    let session = lock(&handle)?;
    Ok(view_of(&session))
}

/// Retrieves the playback view.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` for an unknown session.
pub fn get_playback_view(
    session_id: Uuid,
    store: &SessionStore,
) -> Result<PlaybackView, DomainError> {
    let handle = store.get(session_id)?;
    let session = lock(&handle)?;
    Ok(playback_of(&session))
}

/// Bytes of the clip the front end should be playing, if any.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` for an unknown session.
pub fn get_active_audio(
    session_id: Uuid,
    store: &SessionStore,
) -> Result<Option<Arc<[u8]>>, DomainError> {
    let handle = store.get(session_id)?;
    let session = lock(&handle)?;
    Ok(session.cues().active_clip())
}

/// Looks up panoramic imagery for the displayed location.
///
/// # Errors
///
/// Returns `DomainError::Validation` if no location is displayed and
/// `DomainError::SessionNotFound` for an unknown session.
pub async fn get_panorama(
    session_id: Uuid,
    context: &ExplorerContext,
    store: &SessionStore,
) -> Result<PanoramaAvailability, DomainError> {
    let handle = store.get(session_id)?;
    let at = {
        let session = lock(&handle)?;
        session
            .location()
            .map(|record| record.coordinates)
            .ok_or_else(|| DomainError::Validation("no location is displayed".to_owned()))?
    };
    Ok(await_panorama(&*context.imagery, at, context.imagery_settings).await)
}

#[cfg(test)]
mod tests {
    use pathfinder_core::location::{AudioCache, CoordinateSource, Coordinates, LocationRecord};
    use pathfinder_test_support::summary;
    use pathfinder_tours::domain::catalog::TourCatalog;
    use pathfinder_tours::domain::progress::TourProgress;

    use super::*;

    #[test]
    fn test_tour_view_reports_progress_and_boundaries() {
        // Arrange
        let catalog = TourCatalog::embedded().unwrap();
        let progress = TourProgress::start(catalog.find("stations-of-the-cross").unwrap());

        // Act
        let view = TourProgressView::from(&progress);

        // Assert
        assert_eq!(view.stop_number, 1);
        assert_eq!(view.total_stops, 14);
        assert_eq!(view.previous, None);
        assert_eq!(view.next, Some(1));
        assert_eq!(view.stops[0].status, StopStatus::Current);
        assert_eq!(view.stops[13].status, StopStatus::Upcoming);
        assert!((view.percent_complete - 100.0 / 14.0).abs() < 1e-9);
    }

    #[test]
    fn test_location_view_includes_maps_link() {
        let record = LocationRecord {
            name: "Petra".to_owned(),
            coordinates: Coordinates::new(30.3285, 35.4444),
            coordinate_source: CoordinateSource::Geocoder,
            narration_text: "Welcome to Petra.".to_owned(),
            audio: AudioCache::default(),
            summary: summary("Petra", "A city carved in rock.", None),
        };

        let view = LocationView::from(&record);

        assert_eq!(view.maps_url, "https://www.google.com/maps/@30.3285,35.4444,15z");
        assert!(!view.audio_cached);
    }

    #[test]
    fn test_new_session_view_is_idle_search() {
        let store = SessionStore::new();
        let id = Uuid::new_v4();
        store.insert(ExplorerSession::new(id, None)).unwrap();

        let json = serde_json::to_value(get_session_view(id, &store).unwrap()).unwrap();

        assert_eq!(json["view"], "search");
        assert_eq!(json["loading"], false);
        assert!(json["location"].is_null());
        assert_eq!(json["playback"]["state"], "idle");
        assert_eq!(json["playback"]["cue"]["kind"], "none");
    }

    #[test]
    fn test_active_audio_is_none_without_playback() {
        let store = SessionStore::new();
        let id = Uuid::new_v4();
        store.insert(ExplorerSession::new(id, None)).unwrap();

        assert!(get_active_audio(id, &store).unwrap().is_none());
    }
}
