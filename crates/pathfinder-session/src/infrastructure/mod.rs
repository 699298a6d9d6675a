//! Session storage.

pub mod session_store;
