//! Data transfer objects exchanged over HTTP.

pub mod api;
