//! Application services for the Imagery context.

pub mod panorama;
