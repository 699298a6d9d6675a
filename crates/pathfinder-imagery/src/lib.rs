//! PathFinder: Imagery bounded context.
//!
//! Decides whether street-level panoramic imagery exists near a location.
//! The imagery provider may be slow to initialize; it is awaited once with
//! a bounded timeout, after which the location is explicitly unavailable.

pub mod application;
pub mod domain;
