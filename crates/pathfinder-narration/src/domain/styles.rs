//! Narrative-style directives and fallback texts.

/// Style directives; one is chosen uniformly at random per request.
pub const NARRATIVE_STYLES: &[&str] = &[
    "Create a vivid, immersive first-person tour guide narration",
    "Write an engaging historical storytelling narrative",
    "Provide a dramatic, cinematic description",
    "Share fascinating facts in an enthusiastic tour guide voice",
    "Tell the story as if transporting visitors back in time",
];

/// Used when the service answered but the reply had no narration.
pub const MISSING_NARRATION_TEXT: &str = "Welcome to this historic site. Take a moment to soak in \
the incredible atmosphere and rich history surrounding you.";

/// Used when the service could not be reached or answered garbage.
pub const UNREACHABLE_NARRATION_TEXT: &str = "Welcome to this historic site. Imagine the countless \
stories these ancient paths could tell as you explore one of the world's most significant landmarks.";
