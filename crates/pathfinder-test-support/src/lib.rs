//! Shared test mocks and utilities for the PathFinder explorer.

mod clock;
mod media;
mod providers;
mod rng;

pub use clock::FixedClock;
pub use media::{MediaCall, RecordingAudioBackend};
pub use providers::{
    StubGeocoder, StubImagery, StubKnowledgeBase, StubNarrationService, StubSpeechSynthesizer,
    summary,
};
pub use rng::{MockRng, SequenceRng};
