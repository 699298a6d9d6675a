//! Application services for the Explorer Session context.

pub mod command_handlers;
pub mod context;
pub mod query_handlers;
