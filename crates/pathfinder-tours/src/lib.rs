//! PathFinder: Tours bounded context.
//!
//! Owns the static tour and destination catalog and the user's position
//! within an active tour.

pub mod application;
pub mod domain;
