//! Shared utilities, configuration, and error handling for Scriptsync
//!
//! This crate provides common functionality used across the Scriptsync
//! application:
//! - Configuration loading from the workspace document
//! - Error types and handling
//! - Operation-scoped store connections

pub mod config;
pub mod db;
pub mod error;

pub use config::{workspace_root, Config, Folders, CONFIG_FILE};
pub use db::{connect, Store};
pub use error::{Error, Result};
