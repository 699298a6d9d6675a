//! Playback state machine states.

use serde::Serialize;

/// Playback state.
///
/// `Idle -> Generating -> Playing <-> Paused -> Idle`; stop or natural
/// completion from `Playing`/`Paused` returns to `Idle`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    /// Nothing playing.
    #[default]
    Idle,
    /// Waiting for on-demand synthesis.
    Generating,
    /// Audio is playing.
    Playing,
    /// Audio is paused, position kept.
    Paused,
}

/// Which output path is producing sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackPath {
    /// Decoded audio bytes (cached or freshly synthesized).
    Clip,
    /// The platform's built-in speech engine reading the text.
    PlatformSpeech,
}
