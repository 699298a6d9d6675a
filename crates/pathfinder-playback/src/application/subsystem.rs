//! Audio subsystem ownership.
//!
//! The subsystem wraps the media backend. Playback happens through an
//! `AudioLease`; acquiring a new lease halts whatever the previous lease was
//! playing, so at most one playback is ever audible. Dropping a lease halts
//! its playback (if still current) and frees its clip buffer.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use pathfinder_core::media::{AudioBackend, ClipHandle};
use tracing::debug;

use crate::domain::clip::AudioClip;
use crate::domain::error::PlaybackError;

/// Owner of the media backend.
pub struct AudioSubsystem {
    backend: Mutex<Box<dyn AudioBackend>>,
    current_lease: AtomicU64,
    issued: AtomicU64,
}

impl std::fmt::Debug for AudioSubsystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioSubsystem")
            .field("current_lease", &self.current_lease.load(Ordering::Acquire))
            .finish_non_exhaustive()
    }
}

impl AudioSubsystem {
    /// Wraps `backend`.
    #[must_use]
    pub fn new(backend: Box<dyn AudioBackend>) -> Arc<Self> {
        Arc::new(Self {
            backend: Mutex::new(backend),
            current_lease: AtomicU64::new(0),
            issued: AtomicU64::new(0),
        })
    }

    /// Takes over the audio output, halting the previous holder.
    #[must_use]
    pub fn acquire(self: &Arc<Self>) -> AudioLease {
        let id = self.issued.fetch_add(1, Ordering::AcqRel) + 1;
        let previous = self.current_lease.swap(id, Ordering::AcqRel);
        if previous != 0 {
            debug!(previous, lease = id, "preempting active playback");
            self.with_backend(|backend| backend.halt());
        }
        AudioLease {
            subsystem: Arc::clone(self),
            id,
            clip: None,
        }
    }

    /// Whether any lease currently holds the output.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.current_lease.load(Ordering::Acquire) != 0
    }

    fn with_backend<R>(&self, f: impl FnOnce(&mut dyn AudioBackend) -> R) -> R {
        let mut backend = self.backend.lock().unwrap_or_else(PoisonError::into_inner);
        f(backend.as_mut())
    }
}

/// Exclusive right to play through the subsystem.
#[derive(Debug)]
pub struct AudioLease {
    subsystem: Arc<AudioSubsystem>,
    id: u64,
    clip: Option<ClipHandle>,
}

impl AudioLease {
    /// Whether this lease still holds the output.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.subsystem.current_lease.load(Ordering::Acquire) == self.id
    }

    /// Loads `clip` into a fresh buffer and starts it.
    ///
    /// # Errors
    ///
    /// Returns `PlaybackError::Preempted` if another lease took over and
    /// `PlaybackError::Media` if the backend refuses the clip.
    pub fn play_clip(&mut self, clip: &AudioClip) -> Result<(), PlaybackError> {
        self.ensure_current()?;
        let previous = self.clip.take();
        let handle = self.subsystem.with_backend(|backend| {
            if let Some(previous) = previous {
                backend.release_clip(previous);
            }
            let handle = backend.load_clip(Arc::clone(clip.bytes()))?;
            if let Err(err) = backend.play_clip(handle) {
                backend.release_clip(handle);
                return Err(err);
            }
            Ok(handle)
        })?;
        self.clip = Some(handle);
        Ok(())
    }

    /// Reads `text` with the platform speech engine.
    ///
    /// # Errors
    ///
    /// Returns `PlaybackError::Preempted` if another lease took over and
    /// `PlaybackError::Media` if no speech engine is available.
    pub fn speak(&mut self, text: &str) -> Result<(), PlaybackError> {
        self.ensure_current()?;
        self.subsystem
            .with_backend(|backend| backend.speak(text))
            .map_err(PlaybackError::from)
    }

    /// Pauses, if still current.
    pub fn pause(&self) {
        if self.is_current() {
            self.subsystem.with_backend(|backend| backend.pause());
        }
    }

    /// Resumes, if still current.
    pub fn resume(&self) {
        if self.is_current() {
            self.subsystem.with_backend(|backend| backend.resume());
        }
    }

    fn ensure_current(&self) -> Result<(), PlaybackError> {
        if self.is_current() {
            Ok(())
        } else {
            Err(PlaybackError::Preempted)
        }
    }
}

impl Drop for AudioLease {
    fn drop(&mut self) {
        let current = self
            .subsystem
            .current_lease
            .compare_exchange(self.id, 0, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        let clip = self.clip.take();
        self.subsystem.with_backend(|backend| {
            if current {
                backend.halt();
            }
            if let Some(clip) = clip {
                backend.release_clip(clip);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use pathfinder_core::media::ClipHandle;
    use pathfinder_test_support::{MediaCall, RecordingAudioBackend};

    use super::*;

    fn clip() -> AudioClip {
        AudioClip::decode(Arc::from(&b"ID3\x04"[..])).unwrap()
    }

    #[test]
    fn test_dropping_lease_halts_and_releases_clip() {
        // Arrange
        let backend = RecordingAudioBackend::new();
        let subsystem = AudioSubsystem::new(Box::new(backend.clone()));
        let mut lease = subsystem.acquire();
        lease.play_clip(&clip()).unwrap();

        // Act
        drop(lease);

        // Assert
        assert_eq!(
            backend.calls(),
            vec![
                MediaCall::Load(4),
                MediaCall::PlayClip(ClipHandle(1)),
                MediaCall::Halt,
                MediaCall::Release(ClipHandle(1)),
            ]
        );
        assert!(!subsystem.is_active());
    }

    #[test]
    fn test_new_lease_preempts_previous() {
        let backend = RecordingAudioBackend::new();
        let subsystem = AudioSubsystem::new(Box::new(backend.clone()));
        let mut first = subsystem.acquire();
        first.play_clip(&clip()).unwrap();

        let mut second = subsystem.acquire();

        assert!(!first.is_current());
        assert!(second.is_current());
        assert_eq!(first.speak("late"), Err(PlaybackError::Preempted));
        second.speak("hello").unwrap();

        drop(first);
        let calls = backend.calls();
        // The stale lease frees its buffer without halting the new playback.
        assert_eq!(calls.last(), Some(&MediaCall::Release(ClipHandle(1))));
        assert_eq!(calls.iter().filter(|c| **c == MediaCall::Halt).count(), 1);
        assert!(subsystem.is_active());
    }

    #[test]
    fn test_rejected_clip_is_media_error() {
        let subsystem = AudioSubsystem::new(Box::new(RecordingAudioBackend::rejecting_clips()));
        let mut lease = subsystem.acquire();

        let result = lease.play_clip(&clip());

        assert!(matches!(result, Err(PlaybackError::Media(_))));
    }
}
