//! Media backend for a remote front end.
//!
//! The browser owns the real audio element and speech engine. This backend
//! turns each media call into a `PlaybackCue` the front end polls, and keeps
//! loaded clips so the front end can fetch the bytes it should play.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use pathfinder_core::media::{AudioBackend, ClipHandle, MediaError};
use serde::Serialize;

/// The latest instruction for the front end's media element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlaybackCue {
    /// Nothing has been played yet.
    #[default]
    None,
    /// Play the clip served for `clip_id`.
    Clip {
        /// Clip identifier.
        clip_id: u64,
    },
    /// Speak `text` with the platform speech engine.
    Speech {
        /// Text to read.
        text: String,
    },
    /// Pause the current output.
    Pause,
    /// Resume the current output.
    Resume,
    /// Stop and rewind.
    Halt,
}

#[derive(Debug, Default)]
struct CueState {
    cue: PlaybackCue,
    clips: HashMap<u64, Arc<[u8]>>,
    active_clip: Option<u64>,
    next_clip: u64,
}

/// Read side of a `CueBackend`.
#[derive(Debug, Clone, Default)]
pub struct CueBoard {
    state: Arc<Mutex<CueState>>,
}

impl CueBoard {
    /// Creates an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend writing to this board.
    #[must_use]
    pub fn backend(&self) -> CueBackend {
        CueBackend {
            state: Arc::clone(&self.state),
        }
    }

    /// The most recent cue.
    #[must_use]
    pub fn latest_cue(&self) -> PlaybackCue {
        self.lock().cue.clone()
    }

    /// Bytes of the clip currently loaded for playback, if any.
    #[must_use]
    pub fn active_clip(&self) -> Option<Arc<[u8]>> {
        let state = self.lock();
        state
            .active_clip
            .and_then(|id| state.clips.get(&id).cloned())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CueState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Write side handed to the audio subsystem.
#[derive(Debug)]
pub struct CueBackend {
    state: Arc<Mutex<CueState>>,
}

impl CueBackend {
    fn with_state<R>(&self, f: impl FnOnce(&mut CueState) -> R) -> R {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut *state)
    }
}

impl AudioBackend for CueBackend {
    fn load_clip(&mut self, audio: Arc<[u8]>) -> Result<ClipHandle, MediaError> {
        Ok(self.with_state(|state| {
            state.next_clip += 1;
            state.clips.insert(state.next_clip, audio);
            ClipHandle(state.next_clip)
        }))
    }

    fn play_clip(&mut self, clip: ClipHandle) -> Result<(), MediaError> {
        self.with_state(|state| {
            if !state.clips.contains_key(&clip.0) {
                return Err(MediaError::Unavailable(format!("clip {} not loaded", clip.0)));
            }
            state.active_clip = Some(clip.0);
            state.cue = PlaybackCue::Clip { clip_id: clip.0 };
            Ok(())
        })
    }

    fn speak(&mut self, text: &str) -> Result<(), MediaError> {
        self.with_state(|state| {
            state.active_clip = None;
            state.cue = PlaybackCue::Speech {
                text: text.to_owned(),
            };
        });
        Ok(())
    }

    fn pause(&mut self) {
        self.with_state(|state| state.cue = PlaybackCue::Pause);
    }

    fn resume(&mut self) {
        self.with_state(|state| state.cue = PlaybackCue::Resume);
    }

    fn halt(&mut self) {
        self.with_state(|state| state.cue = PlaybackCue::Halt);
    }

    fn release_clip(&mut self, clip: ClipHandle) {
        self.with_state(|state| {
            state.clips.remove(&clip.0);
            if state.active_clip == Some(clip.0) {
                state.active_clip = None;
            }
        });
    }
}
