//! Database models shared across the directory repository.

pub mod client;
#[cfg(feature = "server")]
pub mod config;
