//! # Launchpad Shared Library
//!
//! Types and helpers used by both the Launchpad web front end and the
//! database check tool.
//!
//! ## Module Organization
//!
//! - `auth`: Session token validation and caller identity resolution
//! - `db`: Connection pool management and scoped connection sessions

pub mod auth;
pub mod db;

/// Current version of the Launchpad shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
