//! Narration Generator.
//!
//! Defined never to fail visibly: any service failure produces a fixed
//! welcome text and no audio.

use std::sync::{Mutex, PoisonError};

use base64::Engine as _;
use pathfinder_core::clock::Clock;
use pathfinder_core::location::NarrationRecord;
use pathfinder_core::provider::NarrationService;
use pathfinder_core::rng::{DeterministicRng, pick_one};
use tracing::{debug, warn};

use crate::domain::request::{NarrationSubject, build_request};
use crate::domain::styles::{MISSING_NARRATION_TEXT, NARRATIVE_STYLES, UNREACHABLE_NARRATION_TEXT};

/// Requests narration for `subject`.
///
/// The RNG is locked only while picking the style, never across the service
/// call.
pub async fn generate_narration(
    subject: &NarrationSubject<'_>,
    narrator: &dyn NarrationService,
    clock: &dyn Clock,
    rng: &Mutex<dyn DeterministicRng + Send>,
) -> NarrationRecord {
    let style = {
        let mut rng_guard = rng.lock().unwrap_or_else(PoisonError::into_inner);
        pick_one(NARRATIVE_STYLES, &mut *rng_guard)
            .copied()
            .unwrap_or(NARRATIVE_STYLES[0])
    };
    let request = build_request(subject, style, clock.now_millis());
    debug!(location = subject.name, style, "requesting narration");

    let reply = match narrator.narrate(&request).await {
        Ok(reply) => reply,
        Err(err) => {
            warn!(location = subject.name, error = %err, "narration service failed");
            return NarrationRecord {
                text: UNREACHABLE_NARRATION_TEXT.to_owned(),
                audio: None,
            };
        }
    };

    let text = match reply.narration {
        Some(text) if !text.trim().is_empty() => text,
        _ => {
            warn!(location = subject.name, "narration reply carried no narration");
            MISSING_NARRATION_TEXT.to_owned()
        }
    };

    let audio = reply.audio_content.and_then(|encoded| {
        base64::engine::general_purpose::STANDARD
            .decode(encoded.as_bytes())
            .map_err(|e| warn!(location = subject.name, error = %e, "narration audio is not valid base64"))
            .ok()
    });

    NarrationRecord { text, audio }
}
