//! Application services for the Narration context.

pub mod generator;
