//! Lightweight in-process metrics (dependency-free).
//!
//! Request counts and latencies are stored as atomics and rendered by the
//! `/metrics` handler in Prometheus text format.

pub mod metrics;

pub use metrics::{Outcome, TallyMetrics};
