//! Domain types for the Imagery context.

pub mod availability;
