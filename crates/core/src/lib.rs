//! oca-port core - preflight and dispatch logic with no git library
//!
//! This crate resolves the branches of a port, checks the repository is in a
//! state where a workflow may safely start, and picks the workflow to run.
//! Git access and the workflows themselves are reached through ports,
//! implemented by adapters in the application crate.

pub mod app;
pub mod domain;
pub mod error;
pub mod ports;

// Re-exports for ergonomics
pub use domain::*;
pub use error::*;
