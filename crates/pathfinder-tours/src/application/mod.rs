//! Application services for the Tours context.

pub mod stepper;
