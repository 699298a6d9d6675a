//! Domain types for the Tours context.

pub mod catalog;
pub mod progress;
