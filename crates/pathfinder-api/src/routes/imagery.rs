//! Routes for panoramic imagery.

use axum::extract::{Path, State};
use axum::{Json, Router, routing::get};
use pathfinder_imagery::domain::availability::PanoramaAvailability;
use pathfinder_session::application::query_handlers;
use tracing::instrument;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /{session_id}/panorama
#[instrument(skip(state))]
async fn panorama(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<PanoramaAvailability>, ApiError> {
    Ok(Json(
        query_handlers::get_panorama(session_id, &state.explorer, &state.sessions).await?,
    ))
}

/// Returns the router for imagery.
pub fn router() -> Router<AppState> {
    Router::new().route("/{session_id}/panorama", get(panorama))
}
