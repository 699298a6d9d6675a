//! Domain rules for the Knowledge context.

pub mod candidates;
