//! Test media backend: records every call made by the playback controller.

use std::sync::{Arc, Mutex};

use pathfinder_core::media::{AudioBackend, ClipHandle, MediaError};

/// A call observed by `RecordingAudioBackend`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaCall {
    /// A clip of the given byte length was loaded.
    Load(usize),
    /// A loaded clip was started.
    PlayClip(ClipHandle),
    /// The platform speech engine was asked to speak.
    Speak(String),
    /// Playback was paused.
    Pause,
    /// Playback was resumed.
    Resume,
    /// Playback was halted.
    Halt,
    /// A clip buffer was released.
    Release(ClipHandle),
}

#[derive(Debug, Default)]
struct Recording {
    calls: Vec<MediaCall>,
    next_handle: u64,
    reject_clips: bool,
}

/// A backend that records all calls. Clones share the same recording, so a
/// test can keep one clone while the controller owns another.
#[derive(Debug, Clone, Default)]
pub struct RecordingAudioBackend {
    inner: Arc<Mutex<Recording>>,
}

impl RecordingAudioBackend {
    /// Creates a backend that accepts everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend whose `load_clip` always fails.
    #[must_use]
    pub fn rejecting_clips() -> Self {
        let backend = Self::default();
        backend.inner.lock().unwrap().reject_clips = true;
        backend
    }

    /// Returns a snapshot of all recorded calls.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<MediaCall> {
        self.inner.lock().unwrap().calls.clone()
    }

    fn record(&self, call: MediaCall) {
        self.inner.lock().unwrap().calls.push(call);
    }
}

impl AudioBackend for RecordingAudioBackend {
    fn load_clip(&mut self, audio: Arc<[u8]>) -> Result<ClipHandle, MediaError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.reject_clips {
            return Err(MediaError::Undecodable("rejected by test backend".into()));
        }
        inner.calls.push(MediaCall::Load(audio.len()));
        inner.next_handle += 1;
        Ok(ClipHandle(inner.next_handle))
    }

    fn play_clip(&mut self, clip: ClipHandle) -> Result<(), MediaError> {
        self.record(MediaCall::PlayClip(clip));
        Ok(())
    }

    fn speak(&mut self, text: &str) -> Result<(), MediaError> {
        self.record(MediaCall::Speak(text.to_owned()));
        Ok(())
    }

    fn pause(&mut self) {
        self.record(MediaCall::Pause);
    }

    fn resume(&mut self) {
        self.record(MediaCall::Resume);
    }

    fn halt(&mut self) {
        self.record(MediaCall::Halt);
    }

    fn release_clip(&mut self, clip: ClipHandle) {
        self.record(MediaCall::Release(clip));
    }
}
