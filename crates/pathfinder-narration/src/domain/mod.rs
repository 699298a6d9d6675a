//! Domain rules for the Narration context.

pub mod request;
pub mod styles;
