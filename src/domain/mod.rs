//! Domain aggregates exposed by the directory service layer.

pub mod client;
pub mod types;
