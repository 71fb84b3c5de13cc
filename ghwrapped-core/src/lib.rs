//! # ghwrapped-core
//!
//! Core library for gh-wrapped - a GitHub year-in-review generator.
//!
//! This library provides:
//! - Domain types for activity, repositories and the assembled record
//! - Pure analytics engines (streaks, timeline, achievements, level, ...)
//! - Database storage layer with SQLite
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Architecture
//!
//! Data flows in one direction:
//! - **Input:** a [`WrappedInput`] bundle already fetched from GitHub
//! - **Derived:** stats, titles, fun facts and level computed by [`analytics`]
//! - **Stored:** one [`WrappedRecord`] per `(username, year)`, plus job status
//!
//! ## Example
//!
//! ```rust,no_run
//! use ghwrapped_core::{Config, Database};
//!
//! // Load configuration
//! let config = Config::load().expect("failed to load config");
//!
//! // Open database
//! let db = Database::open(&Config::database_path()).expect("failed to open database");
//! db.migrate().expect("failed to run migrations");
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use db::Database;
pub use error::{Error, Result};
pub use types::*;

// Public modules
pub mod analytics;
pub mod config;
pub mod db;
pub mod error;
pub mod format;
pub mod logging;
pub mod types;
