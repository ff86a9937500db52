//! Configuration management for `StreamConn`
//!
//! This module provides the `ConfigManager` for loading and saving saved
//! connections and application settings in TOML format.

mod manager;
pub mod settings;

pub use manager::ConfigManager;
pub use settings::{AppSettings, ImportSettings, LoggingSettings};
