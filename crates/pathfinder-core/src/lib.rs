//! PathFinder Core: shared domain abstractions.
//!
//! This crate defines the location data model, the error taxonomy, and the
//! ports every bounded context talks to the outside world through. It
//! contains no infrastructure code.

pub mod clock;
pub mod error;
pub mod location;
pub mod media;
pub mod provider;
pub mod rng;
