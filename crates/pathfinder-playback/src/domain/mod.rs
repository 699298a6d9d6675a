//! Domain types for the Playback context.

pub mod clip;
pub mod error;
pub mod state;
pub mod voices;
