//! PathFinder: Narration bounded context.
//!
//! Responsible for asking the narration-generation service to describe a
//! resolved location in one of several narrative styles, and for falling
//! back to a fixed welcome text whenever that service misbehaves.

pub mod application;
pub mod domain;
