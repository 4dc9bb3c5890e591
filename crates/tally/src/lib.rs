//! Top-level facade crate for tally.
//!
//! Re-exports the registry core and the gateway library so users can depend on a single crate.

pub mod core {
    pub use tally_core::*;
}

pub mod gateway {
    pub use tally_gateway::*;
}
