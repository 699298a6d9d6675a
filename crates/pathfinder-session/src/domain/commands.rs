//! Commands for the Explorer Session context.

use uuid::Uuid;

/// Submit a free-text or `tour:<id>` query.
#[derive(Debug, Clone)]
pub struct SubmitSearch {
    /// Target session.
    pub session_id: Uuid,
    /// Raw query as typed.
    pub query: String,
}

/// Jump to a stop of the active tour.
#[derive(Debug, Clone, Copy)]
pub struct SelectStop {
    /// Target session.
    pub session_id: Uuid,
    /// Requested stop index; may be out of range.
    pub index: i64,
}

/// Playback commands issued by the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackCommand {
    /// Play, or resume when paused.
    Play,
    /// Pause.
    Pause,
    /// Stop and rewind.
    Stop,
    /// The front end reports the audio finished.
    Ended,
}
