//! Domain types for the Explorer Session context.

pub mod commands;
pub mod explorer;
