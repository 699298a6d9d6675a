//! Command handlers for the Explorer Session context.
//!
//! Handlers lock the session only around synchronous state changes. The
//! resolution runs in its own task so a newer command can abort it; that
//! task writes its own result, so the outcome lands even if the caller
//! goes away.

use std::sync::{Arc, Mutex, PoisonError};

use pathfinder_core::error::{DomainError, ResolutionError};
use pathfinder_core::location::Query;
use pathfinder_core::rng::DeterministicRng;
use pathfinder_location::application::orchestrator::resolve_location_on_path;
use pathfinder_playback::application::controller::PlayOutcome;
use tracing::{debug, error, info};
use uuid::Uuid;

use super::context::ExplorerContext;
use crate::domain::commands::{PlaybackCommand, SelectStop, SubmitSearch};
use crate::domain::explorer::{ExplorerSession, ResolutionPlan, ResolutionTicket, SearchOutcome};
use crate::infrastructure::session_store::{SessionHandle, SessionStore, lock};

/// Result of a stop selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// The index was out of range; nothing changed.
    NoOp,
    /// The stop was selected and its location resolved.
    Resolved(SearchOutcome),
}

/// Creates a new explorer session on the search screen.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the store lock is poisoned.
pub fn handle_create_session(
    context: &ExplorerContext,
    store: &SessionStore,
) -> Result<Uuid, DomainError> {
    let id = Uuid::new_v4();
    store.insert(ExplorerSession::new(id, context.synthesizer.clone()))?;
    info!(session_id = %id, "explorer session created");
    Ok(id)
}

/// Handles `SubmitSearch`: parses the query, starts a tour when it names
/// one, and resolves the location.
///
/// # Errors
///
/// Returns `DomainError::Validation` for a blank query and
/// `DomainError::SessionNotFound` for an unknown session.
pub async fn handle_search(
    command: &SubmitSearch,
    context: &ExplorerContext,
    store: &SessionStore,
) -> Result<SearchOutcome, DomainError> {
    let query = Query::parse(&command.query)?;
    let handle = store.get(command.session_id)?;

    let (ticket, plan) = {
        let mut session = lock(&handle)?;
        let plan = session.plan_search(query, &context.catalog);
        (session.begin_resolution(), plan)
    };

    run_resolution(&handle, ticket, plan, context).await
}

/// Handles `SelectStop` for the active tour.
///
/// # Errors
///
/// Returns `DomainError::Validation` if no tour is active and
/// `DomainError::SessionNotFound` for an unknown session.
pub async fn handle_select_stop(
    command: &SelectStop,
    context: &ExplorerContext,
    store: &SessionStore,
) -> Result<StopOutcome, DomainError> {
    let handle = store.get(command.session_id)?;

    let (ticket, plan) = {
        let mut session = lock(&handle)?;
        let Some(plan) = session.select_stop(command.index)? else {
            return Ok(StopOutcome::NoOp);
        };
        (session.begin_resolution(), plan)
    };

    run_resolution(&handle, ticket, plan, context)
        .await
        .map(StopOutcome::Resolved)
}

/// Returns a session to the search screen.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` for an unknown session.
pub fn handle_reset(session_id: Uuid, store: &SessionStore) -> Result<(), DomainError> {
    let handle = store.get(session_id)?;
    lock(&handle)?.reset();
    debug!(%session_id, "session reset");
    Ok(())
}

/// Ends a session: halts its playback, abandons any resolution in flight,
/// and drops it from the store.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` for an unknown session.
pub fn handle_end_session(session_id: Uuid, store: &SessionStore) -> Result<(), DomainError> {
    let handle = store.remove(session_id)?;
    lock(&handle)?.reset();
    info!(%session_id, "explorer session ended");
    Ok(())
}

/// Clears the session's error message.
///
/// # Errors
///
/// Returns `DomainError::SessionNotFound` for an unknown session.
pub fn handle_dismiss_error(session_id: Uuid, store: &SessionStore) -> Result<(), DomainError> {
    let handle = store.get(session_id)?;
    lock(&handle)?.dismiss_error();
    Ok(())
}

/// Applies a playback command to the displayed location's narration.
///
/// When audio has to be synthesized, the session is unlocked while the
/// synthesis service is called.
///
/// # Errors
///
/// Returns `DomainError::Validation` if no location is displayed,
/// `DomainError::Playback` if the media backend refuses to play, and
/// `DomainError::SessionNotFound` for an unknown session.
pub async fn handle_playback(
    session_id: Uuid,
    command: PlaybackCommand,
    rng: &Mutex<dyn DeterministicRng + Send>,
    store: &SessionStore,
) -> Result<(), DomainError> {
    let handle = store.get(session_id)?;

    let (job, audio) = {
        let mut session = lock(&handle)?;
        match command {
            PlaybackCommand::Pause => {
                session.playback_mut().pause();
                return Ok(());
            }
            PlaybackCommand::Stop => {
                session.playback_mut().stop();
                return Ok(());
            }
            PlaybackCommand::Ended => {
                session.playback_mut().playback_ended();
                return Ok(());
            }
            PlaybackCommand::Play => {}
        }

        let location = session
            .location()
            .cloned()
            .ok_or_else(|| DomainError::Validation("no location is displayed".to_owned()))?;
        let outcome = {
            let mut rng_guard = rng.lock().unwrap_or_else(PoisonError::into_inner);
            session.playback_mut().request_play(
                &location.audio,
                &location.narration_text,
                &mut *rng_guard,
            )
        };
        match outcome {
            PlayOutcome::NeedsSynthesis(job) => (job, location.audio.clone()),
            PlayOutcome::Started(path) => {
                debug!(%session_id, ?path, "narration playback started");
                return Ok(());
            }
            PlayOutcome::Resumed | PlayOutcome::Unchanged => return Ok(()),
            PlayOutcome::Failed(err) => return Err(err.into()),
        }
    };

    let result = job.run().await;
    lock(&handle)?
        .playback_mut()
        .complete_synthesis(&job, result, &audio);
    Ok(())
}

async fn run_resolution(
    handle: &SessionHandle,
    ticket: ResolutionTicket,
    plan: ResolutionPlan,
    context: &ExplorerContext,
) -> Result<SearchOutcome, DomainError> {
    let services = context.services.clone();
    let task_handle = Arc::clone(handle);
    let task = tokio::spawn(async move {
        let result = resolve_location_on_path(&plan.query, &plan.path_id, &services).await;
        lock(&task_handle).map(|mut session| session.complete_resolution(ticket, result))
    });
    lock(handle)?.attach_task(ticket, task.abort_handle());

    match task.await {
        Ok(outcome) => outcome,
        Err(join_error) if join_error.is_cancelled() => Ok(SearchOutcome::Superseded),
        Err(join_error) => {
            error!(error = %join_error, "resolution task panicked");
            let failure = ResolutionError::Unexpected(join_error.to_string());
            Ok(lock(handle)?.complete_resolution(ticket, Err(failure)))
        }
    }
}
