//! Top-level facade crate for hostgate.
//!
//! Re-exports the policy core and the gateway library so users can depend on a single crate.

pub mod core {
    pub use hostgate_core::*;
}

pub mod gateway {
    pub use hostgate_gateway::*;
}
