//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use pathfinder_core::provider::{ImageryProvider, SpeechSynthesizer};
use pathfinder_core::rng::DeterministicRng;
use pathfinder_imagery::domain::availability::ImagerySettings;
use pathfinder_location::application::orchestrator::LocationServices;
use pathfinder_session::application::context::ExplorerContext;
use pathfinder_test_support::{
    FixedClock, MockRng, StubGeocoder, StubImagery, StubKnowledgeBase, StubNarrationService,
    StubSpeechSynthesizer, summary,
};
use pathfinder_tours::domain::catalog::TourCatalog;
use tower::ServiceExt;

use pathfinder_api::build_router;
use pathfinder_api::state::AppState;

/// A minimal MP3 payload the playback controller accepts.
pub const MP3: &[u8] = b"ID3\x04\x00narration";

/// Providers wired into a test app.
pub struct TestProviders {
    pub knowledge: StubKnowledgeBase,
    pub synthesizer: Option<StubSpeechSynthesizer>,
    pub imagery: StubImagery,
}

impl Default for TestProviders {
    /// Every query resolves to the Colosseum; synthesis and imagery work.
    fn default() -> Self {
        Self {
            knowledge: StubKnowledgeBase::new()
                .with_summary(summary(
                    "Colosseum",
                    "The Colosseum is an elliptical amphitheatre in the centre of Rome.",
                    Some((41.8902, 12.4922)),
                ))
                .with_search_hits(&[("Colosseum", "an amphitheatre located in Rome")]),
            synthesizer: Some(StubSpeechSynthesizer::producing(MP3.to_vec())),
            imagery: StubImagery::available("colosseum-pano", 41.8902, 12.4922),
        }
    }
}

/// Build the full app router with default stub providers.
pub fn build_test_app() -> Router {
    build_test_app_with(TestProviders::default())
}

/// Build the full app router with custom stub providers. Uses the same
/// route structure as `main.rs`.
pub fn build_test_app_with(providers: TestProviders) -> Router {
    let rng: Arc<Mutex<dyn DeterministicRng + Send>> = Arc::new(Mutex::new(MockRng));
    let synthesizer = providers
        .synthesizer
        .map(|stub| Arc::new(stub) as Arc<dyn SpeechSynthesizer>);
    let imagery: Arc<dyn ImageryProvider> = Arc::new(providers.imagery);

    let explorer = ExplorerContext {
        catalog: Arc::new(TourCatalog::embedded().unwrap()),
        services: LocationServices {
            knowledge: Arc::new(providers.knowledge),
            geocoder: Arc::new(StubGeocoder::not_found()),
            narrator: Arc::new(StubNarrationService::replying("Welcome to the arena.")),
            clock: Arc::new(FixedClock::default()),
            rng,
        },
        synthesizer,
        imagery,
        imagery_settings: ImagerySettings {
            radius_meters: 100,
            timeout: std::time::Duration::from_millis(50),
        },
    };

    build_router(AppState::new(explorer))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Bytes) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, body_bytes)
}

fn to_json(bytes: &Bytes) -> serde_json::Value {
    if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(bytes).unwrap()
    }
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let (status, bytes) = send(app, request).await;
    (status, to_json(&bytes))
}

/// Send a POST request without a body and return the response.
pub async fn post_empty(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let (status, bytes) = send(app, request).await;
    (status, to_json(&bytes))
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let (status, bytes) = send(app, request).await;
    (status, to_json(&bytes))
}

/// Send a GET request and return the raw body.
pub async fn get_bytes(app: Router, uri: &str) -> (StatusCode, Bytes) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Send a DELETE request and return the status.
pub async fn delete(app: Router, uri: &str) -> StatusCode {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await.0
}

/// Create a session and return its id.
pub async fn create_session(app: &Router) -> String {
    let (status, json) = post_empty(app.clone(), "/api/v1/sessions").await;
    assert_eq!(status, StatusCode::CREATED);
    json["session_id"].as_str().unwrap().to_owned()
}
