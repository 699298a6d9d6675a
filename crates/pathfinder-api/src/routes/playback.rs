//! Routes for narration playback.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{
    Json, Router,
    routing::{get, post},
};
use pathfinder_core::error::DomainError;
use pathfinder_session::application::command_handlers;
use pathfinder_session::application::query_handlers::{self, PlaybackView};
use pathfinder_session::domain::commands::PlaybackCommand;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ApiError, ErrorBody};
use crate::state::AppState;

fn parse_command(raw: &str) -> Result<PlaybackCommand, DomainError> {
    match raw {
        "play" => Ok(PlaybackCommand::Play),
        "pause" => Ok(PlaybackCommand::Pause),
        "stop" => Ok(PlaybackCommand::Stop),
        "ended" => Ok(PlaybackCommand::Ended),
        other => Err(DomainError::Validation(format!(
            "unknown playback command '{other}'"
        ))),
    }
}

/// POST /{session_id}/playback/{command}
#[instrument(skip(state))]
async fn playback_command(
    State(state): State<AppState>,
    Path((session_id, command)): Path<(Uuid, String)>,
) -> Result<Json<PlaybackView>, ApiError> {
    let command = parse_command(&command)?;

    command_handlers::handle_playback(
        session_id,
        command,
        &state.explorer.services.rng,
        &state.sessions,
    )
    .await?;

    Ok(Json(query_handlers::get_playback_view(
        session_id,
        &state.sessions,
    )?))
}

/// GET /{session_id}/playback/audio
#[instrument(skip(state))]
async fn active_audio(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let Some(clip) = query_handlers::get_active_audio(session_id, &state.sessions)? else {
        let body = ErrorBody {
            error: "no_active_audio",
            message: "no narration clip is playing".to_owned(),
        };
        return Ok((StatusCode::NOT_FOUND, Json(body)).into_response());
    };

    Ok((
        [(header::CONTENT_TYPE, "audio/mpeg")],
        Body::from(clip.to_vec()),
    )
        .into_response())
}

/// Returns the router for playback.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{session_id}/playback/audio", get(active_audio))
        .route("/{session_id}/playback/{command}", post(playback_command))
}
