//! The explorer session aggregate.
//!
//! Every resolution is tagged with a ticket. Starting a new search, stop
//! selection or reset bumps the ticket and aborts the task holding the old
//! one, so only the latest resolution can ever write the displayed
//! location.

use std::sync::Arc;

use pathfinder_core::error::{DomainError, ResolutionError};
use pathfinder_core::location::{LocationRecord, Query};
use pathfinder_core::provider::SpeechSynthesizer;
use pathfinder_narration::domain::request::SEARCH_PATH_ID;
use pathfinder_playback::application::controller::PlaybackController;
use pathfinder_playback::application::subsystem::AudioSubsystem;
use pathfinder_playback::infrastructure::cue_backend::CueBoard;
use pathfinder_tours::application::stepper::{StopSelection, select_stop};
use pathfinder_tours::domain::catalog::TourCatalog;
use pathfinder_tours::domain::progress::TourProgress;
use serde::Serialize;
use tokio::task::AbortHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Which screen the explorer is on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplorerView {
    /// Search screen with tours and destinations.
    #[default]
    Search,
    /// Immersive viewer for the current location.
    Viewer,
}

/// Identifies one resolution attempt within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionTicket(u64);

/// What to resolve and on whose behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionPlan {
    /// Query handed to the orchestrator.
    pub query: String,
    /// Tour id, or the free-search path id.
    pub path_id: String,
}

impl ResolutionPlan {
    fn search(query: String) -> Self {
        Self {
            query,
            path_id: SEARCH_PATH_ID.to_owned(),
        }
    }

    fn tour_stop(progress: &TourProgress) -> Self {
        Self {
            query: progress.current_stop().query.clone(),
            path_id: progress.tour().id.clone(),
        }
    }
}

/// Whether a finished resolution was written to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchOutcome {
    /// The result (location or error message) is now displayed.
    Applied,
    /// A newer request took over; the result was discarded.
    Superseded,
}

/// One explorer's state.
#[derive(Debug)]
pub struct ExplorerSession {
    id: Uuid,
    view: ExplorerView,
    loading: bool,
    error: Option<String>,
    location: Option<Arc<LocationRecord>>,
    tour: Option<TourProgress>,
    ticket: u64,
    in_flight: Option<AbortHandle>,
    playback: PlaybackController,
    cues: CueBoard,
}

impl ExplorerSession {
    /// Creates a session on the search screen with its own audio subsystem.
    #[must_use]
    pub fn new(id: Uuid, synthesizer: Option<Arc<dyn SpeechSynthesizer>>) -> Self {
        let cues = CueBoard::new();
        let subsystem = AudioSubsystem::new(Box::new(cues.backend()));
        Self {
            id,
            view: ExplorerView::Search,
            loading: false,
            error: None,
            location: None,
            tour: None,
            ticket: 0,
            in_flight: None,
            playback: PlaybackController::new(subsystem, synthesizer),
            cues,
        }
    }

    /// Session id.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Current screen.
    #[must_use]
    pub fn view(&self) -> ExplorerView {
        self.view
    }

    /// Whether a resolution is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The dismissible error message, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The displayed location.
    #[must_use]
    pub fn location(&self) -> Option<&Arc<LocationRecord>> {
        self.location.as_ref()
    }

    /// The active tour.
    #[must_use]
    pub fn tour(&self) -> Option<&TourProgress> {
        self.tour.as_ref()
    }

    /// The playback controller.
    #[must_use]
    pub fn playback(&self) -> &PlaybackController {
        &self.playback
    }

    /// Mutable access to the playback controller.
    pub fn playback_mut(&mut self) -> &mut PlaybackController {
        &mut self.playback
    }

    /// Cues the front end should apply to its media element.
    #[must_use]
    pub fn cues(&self) -> &CueBoard {
        &self.cues
    }

    /// Works out what a query resolves to and updates the active tour.
    ///
    /// A known `tour:<id>` starts that tour at its first stop. An unknown
    /// tour id is searched as plain text.
    pub fn plan_search(&mut self, query: Query, catalog: &TourCatalog) -> ResolutionPlan {
        match query {
            Query::Text(text) => {
                self.tour = None;
                ResolutionPlan::search(text)
            }
            Query::Tour(id) => {
                if let Some(tour) = catalog.find(&id) {
                    let progress = TourProgress::start(tour);
                    let plan = ResolutionPlan::tour_stop(&progress);
                    info!(session_id = %self.id, tour = %id, "tour started");
                    self.tour = Some(progress);
                    plan
                } else {
                    warn!(session_id = %self.id, tour = %id, "unknown tour; searching as text");
                    self.tour = None;
                    ResolutionPlan::search(Query::Tour(id).as_text())
                }
            }
        }
    }

    /// Moves the active tour to `index`.
    ///
    /// Returns `None` when the index is out of range.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if no tour is active.
    pub fn select_stop(&mut self, index: i64) -> Result<Option<ResolutionPlan>, DomainError> {
        let Some(progress) = self.tour.as_mut() else {
            return Err(DomainError::Validation("no tour is active".to_owned()));
        };
        match select_stop(progress, index) {
            StopSelection::NoOp => Ok(None),
            StopSelection::Selected { .. } => Ok(Some(ResolutionPlan::tour_stop(progress))),
        }
    }

    /// Starts a resolution, superseding any in flight.
    pub fn begin_resolution(&mut self) -> ResolutionTicket {
        self.abort_in_flight();
        self.ticket += 1;
        self.loading = true;
        self.error = None;
        ResolutionTicket(self.ticket)
    }

    /// Records the task running `ticket`. A task for an already superseded
    /// ticket is aborted at once; one that already completed is not kept.
    pub fn attach_task(&mut self, ticket: ResolutionTicket, task: AbortHandle) {
        if ticket.0 != self.ticket {
            task.abort();
        } else if self.loading {
            self.in_flight = Some(task);
        }
    }

    /// Applies a finished resolution if `ticket` is still current.
    pub fn complete_resolution(
        &mut self,
        ticket: ResolutionTicket,
        result: Result<LocationRecord, ResolutionError>,
    ) -> SearchOutcome {
        if ticket.0 != self.ticket {
            debug!(session_id = %self.id, ticket = ticket.0, "discarding superseded resolution");
            return SearchOutcome::Superseded;
        }

        self.loading = false;
        self.in_flight = None;
        match result {
            Ok(record) => {
                self.playback.stop();
                info!(session_id = %self.id, name = %record.name, "location displayed");
                self.location = Some(Arc::new(record));
                self.view = ExplorerView::Viewer;
            }
            Err(err) => {
                warn!(session_id = %self.id, error = %err, "resolution failed");
                self.error = Some(err.user_message().to_owned());
            }
        }
        SearchOutcome::Applied
    }

    /// Returns to the search screen, halting playback and dropping the
    /// location, tour and error.
    pub fn reset(&mut self) {
        self.abort_in_flight();
        self.ticket += 1;
        self.loading = false;
        self.error = None;
        self.location = None;
        self.tour = None;
        self.view = ExplorerView::Search;
        self.playback.stop();
    }

    /// Clears the error message.
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    fn abort_in_flight(&mut self) {
        if let Some(task) = self.in_flight.take() {
            debug!(session_id = %self.id, "aborting in-flight resolution");
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use pathfinder_core::error::NotFoundKind;
    use pathfinder_core::location::{AudioCache, CoordinateSource, Coordinates};
    use pathfinder_playback::domain::state::PlaybackState;
    use pathfinder_test_support::{MockRng, summary};

    use super::*;

    fn catalog() -> TourCatalog {
        TourCatalog::embedded().unwrap()
    }

    fn record(name: &str) -> LocationRecord {
        LocationRecord {
            name: name.to_owned(),
            coordinates: Coordinates::new(41.8902, 12.4922),
            coordinate_source: CoordinateSource::Summary,
            narration_text: format!("Welcome to {name}."),
            audio: AudioCache::with_audio(Some(b"ID3\x04".to_vec())),
            summary: summary(name, "extract", Some((41.8902, 12.4922))),
        }
    }

    #[test]
    fn test_tour_query_starts_tour_at_first_stop() {
        // Arrange
        let mut session = ExplorerSession::new(Uuid::new_v4(), None);

        // Act
        let plan = session.plan_search(
            Query::parse("tour:stations-of-the-cross").unwrap(),
            &catalog(),
        );

        // Assert
        assert_eq!(plan.query, "Omariya School, Via Dolorosa, Jerusalem");
        assert_eq!(plan.path_id, "stations-of-the-cross");
        assert_eq!(session.tour().unwrap().current_index(), 0);
    }

    #[test]
    fn test_unknown_tour_is_searched_as_text() {
        let mut session = ExplorerSession::new(Uuid::new_v4(), None);

        let plan = session.plan_search(Query::parse("tour:atlantis").unwrap(), &catalog());

        assert_eq!(plan, ResolutionPlan::search("tour:atlantis".to_owned()));
        assert!(session.tour().is_none());
    }

    #[test]
    fn test_text_query_ends_active_tour() {
        let mut session = ExplorerSession::new(Uuid::new_v4(), None);
        session.plan_search(Query::Tour("stations-of-the-cross".to_owned()), &catalog());

        session.plan_search(Query::Text("Petra".to_owned()), &catalog());

        assert!(session.tour().is_none());
    }

    #[test]
    fn test_stale_ticket_is_superseded() {
        let mut session = ExplorerSession::new(Uuid::new_v4(), None);
        let first = session.begin_resolution();
        let second = session.begin_resolution();

        let stale = session.complete_resolution(first, Ok(record("Colosseum")));
        let fresh = session.complete_resolution(second, Ok(record("Pantheon")));

        assert_eq!(stale, SearchOutcome::Superseded);
        assert_eq!(fresh, SearchOutcome::Applied);
        assert_eq!(session.location().unwrap().name, "Pantheon");
        assert!(!session.is_loading());
        assert_eq!(session.view(), ExplorerView::Viewer);
    }

    #[tokio::test]
    async fn test_task_attached_after_completion_is_not_kept() {
        // Arrange
        let mut session = ExplorerSession::new(Uuid::new_v4(), None);
        let ticket = session.begin_resolution();
        session.complete_resolution(ticket, Ok(record("Colosseum")));
        let finished = tokio::spawn(async {});

        // Act
        session.attach_task(ticket, finished.abort_handle());

        // Assert
        assert!(session.in_flight.is_none());
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn test_task_attached_while_loading_is_kept() {
        let mut session = ExplorerSession::new(Uuid::new_v4(), None);
        let ticket = session.begin_resolution();
        let running = tokio::spawn(std::future::pending::<()>());

        session.attach_task(ticket, running.abort_handle());

        assert!(session.in_flight.is_some());
        running.abort();
    }

    #[test]
    fn test_failed_resolution_sets_user_message() {
        let mut session = ExplorerSession::new(Uuid::new_v4(), None);
        let ticket = session.begin_resolution();

        session.complete_resolution(
            ticket,
            Err(ResolutionError::NotFound(NotFoundKind::Location)),
        );

        assert_eq!(
            session.error(),
            Some("We couldn't find that location. Please try a different name.")
        );
        assert_eq!(session.view(), ExplorerView::Search);

        session.dismiss_error();
        assert!(session.error().is_none());
    }

    #[test]
    fn test_select_stop_without_tour_is_validation_error() {
        let mut session = ExplorerSession::new(Uuid::new_v4(), None);

        assert!(matches!(
            session.select_stop(1),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_out_of_range_stop_is_no_op() {
        let mut session = ExplorerSession::new(Uuid::new_v4(), None);
        session.plan_search(Query::Tour("stations-of-the-cross".to_owned()), &catalog());

        assert_eq!(session.select_stop(99).unwrap(), None);
        assert_eq!(session.tour().unwrap().current_index(), 0);
    }

    #[test]
    fn test_new_location_halts_previous_playback() {
        let mut session = ExplorerSession::new(Uuid::new_v4(), None);
        let ticket = session.begin_resolution();
        session.complete_resolution(ticket, Ok(record("Colosseum")));
        let location = Arc::clone(session.location().unwrap());
        session.playback_mut().request_play(
            &location.audio,
            &location.narration_text,
            &mut MockRng,
        );
        assert_eq!(session.playback().state(), PlaybackState::Playing);

        let ticket = session.begin_resolution();
        session.complete_resolution(ticket, Ok(record("Pantheon")));

        assert_eq!(session.playback().state(), PlaybackState::Idle);
    }

    #[test]
    fn test_reset_returns_to_search_and_supersedes() {
        let mut session = ExplorerSession::new(Uuid::new_v4(), None);
        session.plan_search(Query::Tour("stations-of-the-cross".to_owned()), &catalog());
        let ticket = session.begin_resolution();

        session.reset();
        let outcome = session.complete_resolution(ticket, Ok(record("Omariya School")));

        assert_eq!(outcome, SearchOutcome::Superseded);
        assert_eq!(session.view(), ExplorerView::Search);
        assert!(session.location().is_none());
        assert!(session.tour().is_none());
    }
}
