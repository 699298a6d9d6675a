//! Application services for the Location context.

pub mod orchestrator;
