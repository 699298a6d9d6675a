//! PathFinder API: library crate exposing the router, state and error
//! types so integration tests can build the full application.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;

use axum::Router;

use crate::state::AppState;

/// Builds the application router with every context mounted.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::catalog::router())
        .nest(
            "/api/v1/sessions",
            routes::session::router()
                .merge(routes::playback::router())
                .merge(routes::imagery::router()),
        )
        .with_state(state)
}
