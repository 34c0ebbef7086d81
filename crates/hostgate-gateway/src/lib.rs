//! hostgate gateway library entry.
//!
//! This crate is the request layer: it loads configuration, builds the host
//! policy store, and exposes it over HTTP. It is consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod api;
pub mod app_state;
pub mod config;
pub mod ops;
pub mod router;
