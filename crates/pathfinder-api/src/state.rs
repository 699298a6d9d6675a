//! Shared application state.

use std::sync::{Arc, Mutex};

use pathfinder_core::clock::{Clock, SystemClock};
use pathfinder_core::provider::{ImageryProvider, SpeechSynthesizer};
use pathfinder_core::rng::{DeterministicRng, StdRngSource};
use pathfinder_imagery::domain::availability::ImagerySettings;
use pathfinder_location::application::orchestrator::LocationServices;
use pathfinder_providers::client::build_http_client;
use pathfinder_providers::geocoding::GoogleGeocoder;
use pathfinder_providers::narration_webhook::WebhookNarrationService;
use pathfinder_providers::speech::GoogleSpeechSynthesizer;
use pathfinder_providers::street_view::StreetViewImagery;
use pathfinder_providers::wikipedia::WikipediaClient;
use pathfinder_session::application::context::ExplorerContext;
use pathfinder_session::infrastructure::session_store::SessionStore;
use pathfinder_tours::domain::catalog::TourCatalog;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::error::AppError;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Collaborators shared by every session.
    pub explorer: ExplorerContext,
    /// Live explorer sessions.
    pub sessions: Arc<SessionStore>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("explorer", &self.explorer)
            .field("sessions", &self.sessions.len())
            .finish()
    }
}

impl AppState {
    /// Create new application state with an empty session store.
    #[must_use]
    pub fn new(explorer: ExplorerContext) -> Self {
        Self {
            explorer,
            sessions: Arc::new(SessionStore::new()),
        }
    }

    /// Wires the production providers described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Catalog` if the tour catalog cannot be loaded and
    /// `AppError::Config` if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let catalog = match &config.tour_catalog_path {
            Some(path) => TourCatalog::from_path(path)?,
            None => TourCatalog::embedded()?,
        };
        let client = build_http_client(config.http_timeout)
            .map_err(|e| AppError::Config(format!("failed to build HTTP client: {e}")))?;

        if config.google_maps_api_key.is_none() {
            warn!("GOOGLE_MAPS_API_KEY is not set; geocoding and street view are disabled");
        }
        let synthesizer = config.google_tts_api_key.as_ref().map(|key| {
            Arc::new(GoogleSpeechSynthesizer::new(
                client.clone(),
                config.google_tts_base_url.clone(),
                key.clone(),
            )) as Arc<dyn SpeechSynthesizer>
        });
        if synthesizer.is_none() {
            info!("GOOGLE_TTS_API_KEY is not set; narration falls back to platform speech");
        }

        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let rng: Arc<Mutex<dyn DeterministicRng + Send>> =
            Arc::new(Mutex::new(StdRngSource::from_entropy()));
        let services = LocationServices {
            knowledge: Arc::new(WikipediaClient::new(
                client.clone(),
                config.wikipedia_base_url.clone(),
            )),
            geocoder: Arc::new(GoogleGeocoder::new(
                client.clone(),
                config.google_maps_base_url.clone(),
                config.google_maps_api_key.clone(),
            )),
            narrator: Arc::new(WebhookNarrationService::new(
                client.clone(),
                config.narration_webhook_url.clone(),
            )),
            clock,
            rng,
        };
        let imagery: Arc<dyn ImageryProvider> = Arc::new(StreetViewImagery::new(
            client,
            config.google_maps_base_url.clone(),
            config.google_maps_api_key.clone(),
        ));

        Ok(Self::new(ExplorerContext {
            catalog: Arc::new(catalog),
            services,
            synthesizer,
            imagery,
            imagery_settings: ImagerySettings {
                radius_meters: config.panorama_radius_meters,
                timeout: config.panorama_timeout,
            },
        }))
    }
}
