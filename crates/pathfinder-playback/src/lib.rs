//! PathFinder: Playback bounded context.
//!
//! Responsible for playing a location's narration: cached audio when there
//! is some, freshly synthesized audio otherwise, and the platform speech
//! engine when synthesis is unavailable. Owns the audio subsystem so that
//! exactly one playback is ever active per explorer.

pub mod application;
pub mod domain;
pub mod infrastructure;
