//! Ports to the external services the explorer depends on.
//!
//! Each trait is implemented over HTTP in `pathfinder-providers` and by
//! stubs in `pathfinder-test-support`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::location::{Coordinates, GeocodeRecord, SearchHit, SummaryRecord};

/// Encyclopedic knowledge base offering title lookup and keyword search.
#[async_trait]
pub trait KnowledgeBase: Send + Sync {
    /// Fetches the summary of the page with exactly this title.
    async fn page_summary(&self, title: &str) -> Result<SummaryRecord, ProviderError>;

    /// Keyword search; hits are returned in relevance order.
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, ProviderError>;
}

/// Free-text geocoder.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolves `query` to coordinates and a formatted address.
    async fn geocode(&self, query: &str) -> Result<GeocodeRecord, ProviderError>;
}

/// Body sent to the narration-generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrationRequest {
    /// Tour id, or `user-search` for free-text searches.
    pub path_id: String,
    /// Slug of the display name.
    pub location_id: String,
    /// Display name.
    pub location_title: String,
    /// Truncated summary extract.
    pub location_description: String,
    /// Knowledge-base page identifier.
    pub wikipedia_page: String,
    /// Narrative-style directive.
    pub narrative_style: String,
    /// Milliseconds since the epoch; makes each request unique.
    pub timestamp: i64,
}

/// Reply of the narration-generation service. Every field is optional on the
/// wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrationReply {
    /// Generated narration.
    #[serde(default)]
    pub narration: Option<String>,
    /// Base64-encoded MP3 narration audio.
    #[serde(default)]
    pub audio_content: Option<String>,
}

/// Narration-generation service.
#[async_trait]
pub trait NarrationService: Send + Sync {
    /// Submits one narration request.
    async fn narrate(&self, request: &NarrationRequest) -> Result<NarrationReply, ProviderError>;
}

/// Gender tag understood by the speech-synthesis service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VoiceGender {
    /// Male voice.
    Male,
    /// Female voice.
    Female,
}

/// A synthesis voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Voice {
    /// BCP-47 language code.
    pub language_code: &'static str,
    /// Provider voice name.
    pub name: &'static str,
    /// Voice gender.
    pub ssml_gender: VoiceGender,
}

/// On-demand text-to-speech service.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesizes `text` with `voice`, returning MP3 bytes.
    async fn synthesize(&self, text: &str, voice: &Voice) -> Result<Vec<u8>, ProviderError>;
}

/// Street-level panorama located near a point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panorama {
    /// Provider panorama id.
    pub pano_id: String,
    /// Where the panorama was captured.
    pub position: Coordinates,
}

/// Panoramic imagery service.
#[async_trait]
pub trait ImageryProvider: Send + Sync {
    /// Resolves once the provider can serve lookups.
    async fn ready(&self) -> Result<(), ProviderError> {
        Ok(())
    }

    /// Finds the panorama nearest to `at` within `radius_meters`.
    async fn panorama(&self, at: Coordinates, radius_meters: u32)
    -> Result<Panorama, ProviderError>;
}
