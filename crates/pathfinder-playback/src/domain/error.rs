//! Playback errors.

use pathfinder_core::error::DomainError;
use pathfinder_core::media::MediaError;
use thiserror::Error;

/// Why a playback attempt did not produce sound.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlaybackError {
    /// The audio bytes are not a recognizable MP3 stream.
    #[error("audio is not playable: {0}")]
    Undecodable(String),

    /// The media backend refused the request.
    #[error(transparent)]
    Media(#[from] MediaError),

    /// Another playback took over the audio subsystem.
    #[error("playback was preempted")]
    Preempted,
}

impl From<PlaybackError> for DomainError {
    fn from(err: PlaybackError) -> Self {
        Self::Playback(err.to_string())
    }
}
