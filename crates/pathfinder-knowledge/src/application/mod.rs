//! Application services for the Knowledge context.

pub mod geocode_resolver;
pub mod summary_resolver;
