//! Audio Playback Controller.
//!
//! A synchronous state machine over an `AudioLease`. The one asynchronous
//! step, on-demand synthesis, is split out: `request_play` hands back a
//! `SynthesisJob` that the caller runs without holding the controller, then
//! feeds the result to `complete_synthesis`. Each job carries the
//! generation it was issued for; a completion from an older generation
//! still memoizes its audio but never touches playback state.

use std::sync::{Arc, Mutex, PoisonError};

use pathfinder_core::error::ProviderError;
use pathfinder_core::location::AudioCache;
use pathfinder_core::provider::{SpeechSynthesizer, Voice};
use pathfinder_core::rng::DeterministicRng;
use tracing::{debug, info, warn};

use super::subsystem::{AudioLease, AudioSubsystem};
use crate::domain::clip::AudioClip;
use crate::domain::error::PlaybackError;
use crate::domain::state::{PlaybackPath, PlaybackState};
use crate::domain::voices::pick_voice;

/// What a play request did.
#[derive(Debug)]
pub enum PlayOutcome {
    /// Playback started from `Idle`.
    Started(PlaybackPath),
    /// A paused playback resumed.
    Resumed,
    /// Already playing or generating; nothing changed.
    Unchanged,
    /// Audio must be synthesized first; run the job and report back.
    NeedsSynthesis(SynthesisJob),
    /// Playback could not start; the controller is back in `Idle`.
    Failed(PlaybackError),
}

/// A pending on-demand synthesis.
pub struct SynthesisJob {
    generation: u64,
    voice: Voice,
    text: String,
    synthesizer: Arc<dyn SpeechSynthesizer>,
}

impl std::fmt::Debug for SynthesisJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SynthesisJob")
            .field("generation", &self.generation)
            .field("voice", &self.voice.name)
            .finish_non_exhaustive()
    }
}

impl SynthesisJob {
    /// The voice picked for this job.
    #[must_use]
    pub fn voice(&self) -> Voice {
        self.voice
    }

    /// Calls the synthesis service.
    ///
    /// # Errors
    ///
    /// Returns the provider's error unchanged.
    pub async fn run(&self) -> Result<Vec<u8>, ProviderError> {
        debug!(voice = self.voice.name, chars = self.text.len(), "synthesizing narration");
        self.synthesizer.synthesize(&self.text, &self.voice).await
    }
}

/// Playback controller for one explorer.
pub struct PlaybackController {
    subsystem: Arc<AudioSubsystem>,
    synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    lease: Option<AudioLease>,
    state: PlaybackState,
    path: Option<PlaybackPath>,
    generation: u64,
}

impl std::fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("state", &self.state)
            .field("path", &self.path)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl PlaybackController {
    /// Creates an idle controller. Without a synthesizer, locations that
    /// have no cached audio are read by the platform speech engine.
    #[must_use]
    pub fn new(
        subsystem: Arc<AudioSubsystem>,
        synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    ) -> Self {
        Self {
            subsystem,
            synthesizer,
            lease: None,
            state: PlaybackState::Idle,
            path: None,
            generation: 0,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Output path in use while playing or paused.
    #[must_use]
    pub fn path(&self) -> Option<PlaybackPath> {
        self.path
    }

    /// Handles a play (or resume) request for a location's narration.
    pub fn request_play(
        &mut self,
        audio: &AudioCache,
        text: &str,
        rng: &mut dyn DeterministicRng,
    ) -> PlayOutcome {
        self.drop_if_preempted();
        match self.state {
            PlaybackState::Playing | PlaybackState::Generating => PlayOutcome::Unchanged,
            PlaybackState::Paused => {
                if let Some(lease) = &self.lease {
                    lease.resume();
                }
                self.state = PlaybackState::Playing;
                PlayOutcome::Resumed
            }
            PlaybackState::Idle => {
                if let Some(bytes) = audio.get() {
                    return match self.start_clip(bytes) {
                        Ok(()) => PlayOutcome::Started(PlaybackPath::Clip),
                        Err(PlaybackError::Undecodable(reason)) => {
                            warn!(%reason, "cached audio unplayable; using platform speech");
                            self.start_speech(text)
                        }
                        Err(err) => self.fail(err),
                    };
                }
                match &self.synthesizer {
                    Some(synthesizer) => {
                        self.generation += 1;
                        self.state = PlaybackState::Generating;
                        PlayOutcome::NeedsSynthesis(SynthesisJob {
                            generation: self.generation,
                            voice: pick_voice(rng),
                            text: text.to_owned(),
                            synthesizer: Arc::clone(synthesizer),
                        })
                    }
                    None => self.start_speech(text),
                }
            }
        }
    }

    /// Applies the result of `job`.
    ///
    /// Successful audio is always stored in `audio`. Playback starts only if
    /// the job is still the one the controller is waiting for.
    pub fn complete_synthesis(
        &mut self,
        job: &SynthesisJob,
        result: Result<Vec<u8>, ProviderError>,
        audio: &AudioCache,
    ) -> PlaybackState {
        let is_current =
            job.generation == self.generation && self.state == PlaybackState::Generating;

        match result {
            Ok(bytes) => {
                let bytes: Arc<[u8]> = Arc::from(bytes);
                audio.store(Arc::clone(&bytes));
                if !is_current {
                    debug!(generation = job.generation, "stale synthesis memoized");
                    return self.state;
                }
                match self.start_clip(bytes) {
                    Ok(()) => info!(voice = job.voice.name, "playing synthesized narration"),
                    Err(err) => {
                        self.fail(err);
                    }
                }
            }
            Err(err) => {
                warn!(error = %err, voice = job.voice.name, "speech synthesis failed");
                if is_current {
                    self.reset();
                }
            }
        }
        self.state
    }

    /// Pauses a playing narration, keeping its position.
    pub fn pause(&mut self) -> PlaybackState {
        self.drop_if_preempted();
        if self.state == PlaybackState::Playing {
            if let Some(lease) = &self.lease {
                lease.pause();
            }
            self.state = PlaybackState::Paused;
        }
        self.state
    }

    /// Halts playback and rewinds. A pending synthesis is abandoned; its
    /// audio will still be memoized when it lands.
    pub fn stop(&mut self) -> PlaybackState {
        match self.state {
            PlaybackState::Idle => {}
            PlaybackState::Generating => {
                self.generation += 1;
                self.reset();
            }
            PlaybackState::Playing | PlaybackState::Paused => self.reset(),
        }
        self.state
    }

    /// Natural end of the audio: frees the clip buffer and returns to
    /// `Idle`.
    pub fn playback_ended(&mut self) -> PlaybackState {
        if self.state == PlaybackState::Playing {
            debug!(path = ?self.path, "narration finished");
            self.reset();
        }
        self.state
    }

    /// Runs a whole play request, synthesizing inline when needed.
    ///
    /// For callers that own the controller exclusively; shared owners should
    /// use `request_play` and `complete_synthesis` so the synthesis call
    /// runs without the controller locked.
    pub async fn play(
        &mut self,
        audio: &AudioCache,
        text: &str,
        rng: &Mutex<dyn DeterministicRng + Send>,
    ) -> PlaybackState {
        let outcome = {
            let mut rng_guard = rng.lock().unwrap_or_else(PoisonError::into_inner);
            self.request_play(audio, text, &mut *rng_guard)
        };
        if let PlayOutcome::NeedsSynthesis(job) = outcome {
            let result = job.run().await;
            return self.complete_synthesis(&job, result, audio);
        }
        self.state
    }

    fn start_clip(&mut self, bytes: Arc<[u8]>) -> Result<(), PlaybackError> {
        let clip = AudioClip::decode(bytes)?;
        let mut lease = self.subsystem.acquire();
        lease.play_clip(&clip)?;
        self.lease = Some(lease);
        self.state = PlaybackState::Playing;
        self.path = Some(PlaybackPath::Clip);
        Ok(())
    }

    fn start_speech(&mut self, text: &str) -> PlayOutcome {
        let mut lease = self.subsystem.acquire();
        if let Err(err) = lease.speak(text) {
            return self.fail(err);
        }
        self.lease = Some(lease);
        self.state = PlaybackState::Playing;
        self.path = Some(PlaybackPath::PlatformSpeech);
        PlayOutcome::Started(PlaybackPath::PlatformSpeech)
    }

    fn fail(&mut self, err: PlaybackError) -> PlayOutcome {
        warn!(error = %err, "playback failed");
        self.reset();
        PlayOutcome::Failed(err)
    }

    fn reset(&mut self) {
        self.lease = None;
        self.state = PlaybackState::Idle;
        self.path = None;
    }

    fn drop_if_preempted(&mut self) {
        if self.lease.as_ref().is_some_and(|lease| !lease.is_current()) {
            debug!("playback was preempted elsewhere");
            self.reset();
        }
    }
}
