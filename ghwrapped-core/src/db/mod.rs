//! Database layer for gh-wrapped
//!
//! This module provides the storage layer using SQLite with:
//! - Schema migrations
//! - Wrapped records and job status keyed by `(username, year)`

pub mod repo;
pub mod schema;

pub use repo::Database;
