//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

/// Failure reported by an external provider (knowledge base, geocoder,
/// narration webhook, speech synthesis, imagery).
///
/// Provider errors are absorbed at the resolver boundary and logged; they are
/// never shown to end users.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// The provider has no record for the request.
    #[error("not found")]
    NotFound,

    /// The provider answered with a non-success HTTP status.
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// The provider answered 200 but reported a failure status in its body.
    #[error("provider rejected request: {0}")]
    Rejected(String),

    /// The request never completed (connect, timeout, reset).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The response body could not be decoded.
    #[error("malformed response: {0}")]
    Decode(String),

    /// The provider is missing credentials or is disabled.
    #[error("provider not configured: {0}")]
    NotConfigured(&'static str),
}

/// What a failed resolution could not find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundKind {
    /// The summary lookup failed entirely.
    Location,
    /// A summary was found but no coordinates could be attached to it.
    Coordinates,
}

impl std::fmt::Display for NotFoundKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Location => f.write_str("location"),
            Self::Coordinates => f.write_str("coordinates"),
        }
    }
}

/// The user-facing failure taxonomy of a location resolution.
///
/// Narration and speech-synthesis failures are deliberately absent: both
/// degrade to fallback output instead of propagating.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolutionError {
    /// Nothing usable was found for the query.
    #[error("{0} not found")]
    NotFound(NotFoundKind),

    /// Anything else that went wrong while orchestrating.
    #[error("unexpected resolution failure: {0}")]
    Unexpected(String),
}

impl ResolutionError {
    /// The single dismissible message shown to the user.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::NotFound(NotFoundKind::Location) => {
                "We couldn't find that location. Please try a different name."
            }
            Self::NotFound(NotFoundKind::Coordinates) => {
                "We found information but couldn't locate it on the map."
            }
            Self::Unexpected(_) => "An unexpected error occurred. Please try again.",
        }
    }
}

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An explorer session was not found.
    #[error("session not found: {0}")]
    SessionNotFound(Uuid),

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// A playback command could not be carried out.
    #[error("playback error: {0}")]
    Playback(String),

    /// An infrastructure error (poisoned lock, failed task, ...).
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
