//! Domain rules for the Location context.

pub mod position;
