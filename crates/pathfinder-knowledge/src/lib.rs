//! PathFinder: Knowledge bounded context.
//!
//! Responsible for turning a free-text query into an encyclopedic summary
//! and, when the summary carries no position, into geocoded coordinates.
//! Every provider failure is absorbed here and reported as "not found".

pub mod application;
pub mod domain;
