//! Stub providers: canned `pathfinder_core::provider` implementations that
//! record how they were called.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use pathfinder_core::error::ProviderError;
use pathfinder_core::location::{Coordinates, GeocodeRecord, PageKind, SearchHit, SummaryRecord};
use pathfinder_core::provider::{
    Geocoder, ImageryProvider, KnowledgeBase, NarrationReply, NarrationRequest, NarrationService,
    Panorama, SpeechSynthesizer, Voice,
};

/// Builds a standard-page summary with sensible defaults.
#[must_use]
pub fn summary(title: &str, extract: &str, coordinates: Option<(f64, f64)>) -> SummaryRecord {
    SummaryRecord {
        title: title.to_owned(),
        extract: extract.to_owned(),
        description: None,
        coordinates: coordinates.map(|(lat, lng)| Coordinates::new(lat, lng)),
        thumbnail_url: None,
        page_url: format!("https://en.wikipedia.org/wiki/{}", title.replace(' ', "_")),
        kind: PageKind::Standard,
    }
}

/// A knowledge base backed by in-memory summaries and a fixed search result.
///
/// `page_summary` answers `NotFound` for unknown titles; `search` returns the
/// configured hits regardless of the query.
#[derive(Debug, Default)]
pub struct StubKnowledgeBase {
    summaries: HashMap<String, SummaryRecord>,
    search_hits: Vec<SearchHit>,
    unavailable: bool,
    panics: bool,
    delays: HashMap<String, Duration>,
    summary_calls: Mutex<Vec<String>>,
    search_calls: Mutex<Vec<String>>,
}

impl StubKnowledgeBase {
    /// Creates an empty knowledge base: every lookup is `NotFound`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a knowledge base that fails every call with a transport error.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Creates a knowledge base whose every call panics.
    #[must_use]
    pub fn panicking() -> Self {
        Self {
            panics: true,
            ..Self::default()
        }
    }

    /// Makes `page_summary(title)` sleep for `delay` before answering.
    #[must_use]
    pub fn with_delay(mut self, title: &str, delay: Duration) -> Self {
        self.delays.insert(title.to_owned(), delay);
        self
    }

    /// Registers `record` under its title.
    #[must_use]
    pub fn with_summary(mut self, record: SummaryRecord) -> Self {
        self.summaries.insert(record.title.clone(), record);
        self
    }

    /// Sets the hits returned by every search.
    #[must_use]
    pub fn with_search_hits(mut self, hits: &[(&str, &str)]) -> Self {
        self.search_hits = hits
            .iter()
            .map(|(title, snippet)| SearchHit {
                title: (*title).to_owned(),
                snippet: (*snippet).to_owned(),
            })
            .collect();
        self
    }

    /// Titles passed to `page_summary`, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn summary_calls(&self) -> Vec<String> {
        self.summary_calls.lock().unwrap().clone()
    }

    /// Queries passed to `search`, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn search_calls(&self) -> Vec<String> {
        self.search_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl KnowledgeBase for StubKnowledgeBase {
    async fn page_summary(&self, title: &str) -> Result<SummaryRecord, ProviderError> {
        self.summary_calls.lock().unwrap().push(title.to_owned());
        if let Some(delay) = self.delays.get(title) {
            tokio::time::sleep(*delay).await;
        }
        assert!(!self.panics, "knowledge base exploded on '{title}'");
        if self.unavailable {
            return Err(ProviderError::Transport("connection refused".into()));
        }
        self.summaries
            .get(title)
            .cloned()
            .ok_or(ProviderError::NotFound)
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, ProviderError> {
        self.search_calls.lock().unwrap().push(query.to_owned());
        if self.unavailable {
            return Err(ProviderError::Transport("connection refused".into()));
        }
        Ok(self.search_hits.clone())
    }
}

/// A geocoder returning one configured result.
#[derive(Debug)]
pub struct StubGeocoder {
    result: Result<GeocodeRecord, ProviderError>,
    calls: Mutex<Vec<String>>,
}

impl StubGeocoder {
    /// A geocoder that resolves every query to the given point.
    #[must_use]
    pub fn found(lat: f64, lng: f64, formatted_name: &str) -> Self {
        Self {
            result: Ok(GeocodeRecord {
                coordinates: Coordinates::new(lat, lng),
                formatted_name: formatted_name.to_owned(),
            }),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A geocoder that reports `ZERO_RESULTS` for every query.
    #[must_use]
    pub fn not_found() -> Self {
        Self {
            result: Err(ProviderError::Rejected("ZERO_RESULTS".into())),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Queries passed to `geocode`, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Geocoder for StubGeocoder {
    async fn geocode(&self, query: &str) -> Result<GeocodeRecord, ProviderError> {
        self.calls.lock().unwrap().push(query.to_owned());
        self.result.clone()
    }
}

/// A narration service returning one configured reply.
#[derive(Debug)]
pub struct StubNarrationService {
    result: Result<NarrationReply, ProviderError>,
    requests: Mutex<Vec<NarrationRequest>>,
}

impl StubNarrationService {
    /// A service that narrates every request with `text`.
    #[must_use]
    pub fn replying(text: &str) -> Self {
        Self::with_reply(NarrationReply {
            narration: Some(text.to_owned()),
            audio_content: None,
        })
    }

    /// A service that returns `reply` verbatim.
    #[must_use]
    pub fn with_reply(reply: NarrationReply) -> Self {
        Self {
            result: Ok(reply),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A service whose every call fails at the transport level.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            result: Err(ProviderError::Transport("connection reset".into())),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn requests(&self) -> Vec<NarrationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl NarrationService for StubNarrationService {
    async fn narrate(&self, request: &NarrationRequest) -> Result<NarrationReply, ProviderError> {
        self.requests.lock().unwrap().push(request.clone());
        self.result.clone()
    }
}

/// A speech synthesizer returning one configured result.
#[derive(Debug)]
pub struct StubSpeechSynthesizer {
    result: Result<Vec<u8>, ProviderError>,
    calls: Mutex<Vec<(String, Voice)>>,
}

impl StubSpeechSynthesizer {
    /// A synthesizer that answers every call with `audio`.
    #[must_use]
    pub fn producing(audio: Vec<u8>) -> Self {
        Self {
            result: Ok(audio),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A synthesizer whose every call fails with HTTP 503.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            result: Err(ProviderError::Status(503)),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// `(text, voice)` pairs received, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<(String, Voice)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechSynthesizer for StubSpeechSynthesizer {
    async fn synthesize(&self, text: &str, voice: &Voice) -> Result<Vec<u8>, ProviderError> {
        self.calls.lock().unwrap().push((text.to_owned(), *voice));
        self.result.clone()
    }
}

/// An imagery provider returning one configured result.
#[derive(Debug)]
pub struct StubImagery {
    result: Result<Panorama, ProviderError>,
    never_ready: bool,
}

impl StubImagery {
    /// Imagery available everywhere, captured at the given point.
    #[must_use]
    pub fn available(pano_id: &str, lat: f64, lng: f64) -> Self {
        Self {
            result: Ok(Panorama {
                pano_id: pano_id.to_owned(),
                position: Coordinates::new(lat, lng),
            }),
            never_ready: false,
        }
    }

    /// Imagery unavailable everywhere.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            result: Err(ProviderError::Rejected("ZERO_RESULTS".into())),
            never_ready: false,
        }
    }

    /// A provider that never finishes initializing.
    #[must_use]
    pub fn never_ready() -> Self {
        Self {
            result: Err(ProviderError::NotFound),
            never_ready: true,
        }
    }
}

#[async_trait]
impl ImageryProvider for StubImagery {
    async fn ready(&self) -> Result<(), ProviderError> {
        if self.never_ready {
            std::future::pending::<()>().await;
        }
        Ok(())
    }

    async fn panorama(
        &self,
        _at: Coordinates,
        _radius_meters: u32,
    ) -> Result<Panorama, ProviderError> {
        self.result.clone()
    }
}
