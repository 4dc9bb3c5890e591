//! HTTP adapter for the counter registry.
//!
//! Decodes `METHOD /counters/{name}` into a registry call and encodes the
//! result into a status code and JSON body.

pub mod counters;
pub mod error;

pub use error::ApiError;
