//! PathFinder: Explorer Session bounded context.
//!
//! One explorer session stands for one browser tab: the current search or
//! viewer screen, the displayed location, the active tour and the playback
//! controller. Sessions live in process memory only.

pub mod application;
pub mod domain;
pub mod infrastructure;
