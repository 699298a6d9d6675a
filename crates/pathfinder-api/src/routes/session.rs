//! Routes for explorer sessions: search, tour navigation, reset and teardown.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{
    Json, Router,
    routing::{delete, get, post},
};
use pathfinder_session::application::command_handlers::{self, StopOutcome};
use pathfinder_session::application::query_handlers::{self, SessionView};
use pathfinder_session::domain::commands;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Response body for POST /.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    /// The new session.
    pub session_id: Uuid,
}

/// Request body for POST /{session_id}/search.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Free text, or `tour:<id>`.
    pub query: String,
}

/// Response body for commands that resolve a location.
#[derive(Debug, Serialize)]
pub struct ResolutionResponse {
    /// `applied`, `superseded`, or `no_op` for an out-of-range stop.
    pub outcome: &'static str,
    /// Session state after the command.
    pub session: SessionView,
}

/// POST /
#[instrument(skip(state))]
async fn create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let session_id = command_handlers::handle_create_session(&state.explorer, &state.sessions)?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { session_id })))
}

/// GET /{session_id}
#[instrument(skip(state))]
async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionView>, ApiError> {
    Ok(Json(query_handlers::get_session_view(
        session_id,
        &state.sessions,
    )?))
}

/// POST /{session_id}/search
#[instrument(skip(state, request))]
async fn search(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<ResolutionResponse>, ApiError> {
    let command = commands::SubmitSearch {
        session_id,
        query: request.query,
    };
    info!(query = %command.query, "handling search command");

    let outcome =
        command_handlers::handle_search(&command, &state.explorer, &state.sessions).await?;

    resolution_response(&state, session_id, outcome_label(StopOutcome::Resolved(outcome)))
}

/// POST /{session_id}/tour/stops/{index}
#[instrument(skip(state))]
async fn select_stop(
    State(state): State<AppState>,
    Path((session_id, index)): Path<(Uuid, i64)>,
) -> Result<Json<ResolutionResponse>, ApiError> {
    let command = commands::SelectStop { session_id, index };

    let outcome =
        command_handlers::handle_select_stop(&command, &state.explorer, &state.sessions).await?;

    resolution_response(&state, session_id, outcome_label(outcome))
}

/// POST /{session_id}/reset
#[instrument(skip(state))]
async fn reset(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionView>, ApiError> {
    command_handlers::handle_reset(session_id, &state.sessions)?;
    Ok(Json(query_handlers::get_session_view(
        session_id,
        &state.sessions,
    )?))
}

/// DELETE /{session_id}
#[instrument(skip(state))]
async fn end_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    command_handlers::handle_end_session(session_id, &state.sessions)?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /{session_id}/error
#[instrument(skip(state))]
async fn dismiss_error(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    command_handlers::handle_dismiss_error(session_id, &state.sessions)?;
    Ok(StatusCode::NO_CONTENT)
}

fn outcome_label(outcome: StopOutcome) -> &'static str {
    use pathfinder_session::domain::explorer::SearchOutcome;

    match outcome {
        StopOutcome::NoOp => "no_op",
        StopOutcome::Resolved(SearchOutcome::Applied) => "applied",
        StopOutcome::Resolved(SearchOutcome::Superseded) => "superseded",
    }
}

fn resolution_response(
    state: &AppState,
    session_id: Uuid,
    outcome: &'static str,
) -> Result<Json<ResolutionResponse>, ApiError> {
    let session = query_handlers::get_session_view(session_id, &state.sessions)?;
    Ok(Json(ResolutionResponse { outcome, session }))
}

/// Returns the router for explorer sessions.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_session))
        .route("/{session_id}", get(get_session).delete(end_session))
        .route("/{session_id}/search", post(search))
        .route("/{session_id}/tour/stops/{index}", post(select_stop))
        .route("/{session_id}/reset", post(reset))
        .route("/{session_id}/error", delete(dismiss_error))
}
