//! Collaborators shared by every explorer session.

use std::sync::Arc;

use pathfinder_core::provider::{ImageryProvider, SpeechSynthesizer};
use pathfinder_imagery::domain::availability::ImagerySettings;
use pathfinder_location::application::orchestrator::LocationServices;
use pathfinder_tours::domain::catalog::TourCatalog;

/// Everything a session handler needs besides the session itself.
#[derive(Clone)]
pub struct ExplorerContext {
    /// Tours and destinations.
    pub catalog: Arc<TourCatalog>,
    /// Resolution collaborators.
    pub services: LocationServices,
    /// On-demand speech synthesis; `None` selects platform speech.
    pub synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    /// Panoramic imagery.
    pub imagery: Arc<dyn ImageryProvider>,
    /// Panorama lookup parameters.
    pub imagery_settings: ImagerySettings,
}

impl std::fmt::Debug for ExplorerContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExplorerContext")
            .field("tours", &self.catalog.tours().len())
            .field("synthesis_enabled", &self.synthesizer.is_some())
            .field("imagery_settings", &self.imagery_settings)
            .finish_non_exhaustive()
    }
}
