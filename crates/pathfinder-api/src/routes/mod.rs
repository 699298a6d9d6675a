//! Route modules, one per API area.

pub mod catalog;
pub mod health;
pub mod imagery;
pub mod playback;
pub mod session;
