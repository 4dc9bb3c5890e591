//! Tally core: the counter registry and the error surface shared by the
//! gateway and any other front end.
//!
//! This crate carries no transport or runtime dependencies. The registry is a
//! plain owned value so callers decide how it is shared.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Every fallible path
//! surfaces as `TallyError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod registry;

/// Shared result type.
pub use error::{Result, TallyError};
pub use registry::{CountReading, Counter, CounterRegistry};
