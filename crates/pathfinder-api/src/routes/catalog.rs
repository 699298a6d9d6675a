//! Routes for the tour and destination catalog.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use pathfinder_tours::domain::catalog::{Destination, DestinationCategory, Tour};
use serde::Serialize;

use crate::state::AppState;

/// A quick-pick destination with its category label.
#[derive(Debug, Serialize)]
pub struct DestinationResponse {
    /// Display name.
    pub name: String,
    /// Emoji icon.
    pub icon: String,
    /// Query to submit when picked.
    pub query: String,
    /// Category.
    pub category: DestinationCategory,
    /// Display label of the category.
    pub category_label: &'static str,
}

impl From<&Destination> for DestinationResponse {
    fn from(destination: &Destination) -> Self {
        Self {
            name: destination.name.clone(),
            icon: destination.icon.clone(),
            query: destination.query.clone(),
            category: destination.category,
            category_label: destination.category.label(),
        }
    }
}

/// GET /tours
async fn list_tours(State(state): State<AppState>) -> Json<Vec<Tour>> {
    Json(
        state
            .explorer
            .catalog
            .tours()
            .iter()
            .map(|tour| Tour::clone(tour))
            .collect(),
    )
}

/// GET /destinations
async fn list_destinations(State(state): State<AppState>) -> Json<Vec<DestinationResponse>> {
    Json(
        state
            .explorer
            .catalog
            .destinations()
            .iter()
            .map(DestinationResponse::from)
            .collect(),
    )
}

/// Returns the router for the catalog.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tours", get(list_tours))
        .route("/destinations", get(list_destinations))
}
