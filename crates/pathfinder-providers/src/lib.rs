//! PathFinder: outbound HTTP adapters.
//!
//! Each adapter implements one provider port from `pathfinder-core` on top
//! of a shared `reqwest::Client` with a bounded timeout. Adapters report
//! failures as `ProviderError`; deciding what a failure means is left to
//! the resolvers.

pub mod client;
pub mod geocoding;
pub mod narration_webhook;
pub mod speech;
pub mod street_view;
pub mod wikipedia;

#[cfg(test)]
pub(crate) mod fake_server;
