//! Media backends for the Playback context.

pub mod cue_backend;
