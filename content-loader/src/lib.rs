//! Content loader
//!
//! This crate provides the command-line loader that runs a content module's
//! registration phase against in-memory registries.

pub mod config;
pub mod manifest;
pub mod loader;

// Re-export main types
pub use config::Config;
pub use manifest::{ItemEntry, Manifest};
pub use loader::{load, LoadOptions, LoadReport};
