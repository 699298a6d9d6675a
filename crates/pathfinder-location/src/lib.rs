//! PathFinder: Location bounded context.
//!
//! Sequences the summary, geocode and narration resolvers into a single
//! "resolve location" operation that yields a display-ready
//! `LocationRecord`.

pub mod application;
pub mod domain;
