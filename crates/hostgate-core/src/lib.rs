//! hostgate core: visitor policy records, the welcome decision, and storage.
//!
//! This crate owns the host policy invariants (canonical identifiers, relationship
//! list mutation rules, welcome decision order) and the persistence contract. It
//! carries no transport or runtime dependencies so the gateway and tests can
//! drive it directly.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here.
//! All fallible paths surface as `HostgateError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod host;
pub mod policy;
pub mod repo;
pub mod store;

/// Shared result type.
pub use error::{HostgateError, Result};
pub use host::{Flag, HostId, HostPolicy, ListKind};
pub use policy::Verdict;
pub use store::HostPolicyStore;
