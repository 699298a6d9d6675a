//! Application services for the Playback context.

pub mod controller;
pub mod subsystem;
