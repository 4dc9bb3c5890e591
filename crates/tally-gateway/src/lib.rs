//! Tally gateway library entry.
//!
//! Wires the counter registry behind an axum HTTP surface together with
//! config loading, metrics, and operational endpoints. Consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod api;
pub mod app_state;
pub mod config;
pub mod obs;
pub mod ops;
pub mod router;
