//! Core types and trait definitions for the Roster follower store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod directory;
pub mod error;
pub mod follower;
pub mod resolver;
pub mod store;

pub use error::{DirectoryError, ResolveError};
