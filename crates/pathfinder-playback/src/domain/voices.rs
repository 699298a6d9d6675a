//! Synthesis voice roster.

use pathfinder_core::provider::{Voice, VoiceGender};
use pathfinder_core::rng::{DeterministicRng, pick_one};

/// Voices used for on-demand synthesis; one distinct language/gender pair
/// each.
pub const VOICE_ROSTER: &[Voice] = &[
    Voice {
        language_code: "en-US",
        name: "en-US-Neural2-D",
        ssml_gender: VoiceGender::Male,
    },
    Voice {
        language_code: "en-US",
        name: "en-US-Neural2-F",
        ssml_gender: VoiceGender::Female,
    },
    Voice {
        language_code: "en-GB",
        name: "en-GB-Neural2-B",
        ssml_gender: VoiceGender::Male,
    },
    Voice {
        language_code: "en-GB",
        name: "en-GB-Neural2-A",
        ssml_gender: VoiceGender::Female,
    },
    Voice {
        language_code: "en-AU",
        name: "en-AU-Neural2-B",
        ssml_gender: VoiceGender::Male,
    },
];

/// Picks a roster voice uniformly at random.
#[must_use]
pub fn pick_voice(rng: &mut dyn DeterministicRng) -> Voice {
    pick_one(VOICE_ROSTER, rng)
        .copied()
        .unwrap_or(VOICE_ROSTER[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathfinder_test_support::SequenceRng;

    #[test]
    fn test_roster_pairs_are_distinct() {
        for (i, a) in VOICE_ROSTER.iter().enumerate() {
            for b in &VOICE_ROSTER[i + 1..] {
                assert!(
                    a.language_code != b.language_code || a.ssml_gender != b.ssml_gender,
                    "{} and {} share language and gender",
                    a.name,
                    b.name
                );
            }
        }
    }

    #[test]
    fn test_pick_voice_follows_rng() {
        let mut rng = SequenceRng::new(vec![3]);
        assert_eq!(pick_voice(&mut rng).name, "en-GB-Neural2-A");
    }
}
