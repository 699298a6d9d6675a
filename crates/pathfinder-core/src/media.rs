//! Host media surface abstraction.
//!
//! The playback controller never touches an audio device directly: it drives
//! an `AudioBackend`, which in production forwards cues to the browser and in
//! tests records every call.

use std::sync::Arc;

use thiserror::Error;

/// Opaque handle to a decoded clip held by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClipHandle(pub u64);

/// Failure reported by the media backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MediaError {
    /// The backend could not decode the audio bytes.
    #[error("audio could not be decoded: {0}")]
    Undecodable(String),

    /// The backend refused the request.
    #[error("media backend unavailable: {0}")]
    Unavailable(String),
}

/// Audio element plus platform speech engine.
pub trait AudioBackend: Send {
    /// Decodes `audio` into a temporary buffer and returns its handle.
    ///
    /// # Errors
    ///
    /// Returns `MediaError` if the bytes cannot be decoded.
    fn load_clip(&mut self, audio: Arc<[u8]>) -> Result<ClipHandle, MediaError>;

    /// Starts playing a loaded clip from the beginning.
    ///
    /// # Errors
    ///
    /// Returns `MediaError` if the clip cannot be started.
    fn play_clip(&mut self, clip: ClipHandle) -> Result<(), MediaError>;

    /// Speaks `text` with the platform's built-in speech engine.
    ///
    /// # Errors
    ///
    /// Returns `MediaError` if no speech engine is available.
    fn speak(&mut self, text: &str) -> Result<(), MediaError>;

    /// Pauses whatever is playing, keeping its position.
    fn pause(&mut self);

    /// Resumes from the paused position.
    fn resume(&mut self);

    /// Stops playback and rewinds to the start.
    fn halt(&mut self);

    /// Frees the temporary buffer behind `clip`.
    fn release_clip(&mut self, clip: ClipHandle);
}
