//! Error types for `StreamConn`
//!
//! Parsing a connection string never produces an error: an unusable string is
//! simply absent. The types here cover the layers around the parser, namely
//! configuration files, protocol lookup by name, and list imports.

use std::path::PathBuf;
use thiserror::Error;

/// Errors related to configuration file operations
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration file
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for {field}: {reason}")]
    Validation {
        /// The field that failed validation
        field: String,
        /// The reason for validation failure
        reason: String,
    },

    /// Configuration directory could not be determined
    #[error("Configuration directory not found: {0}")]
    NotFound(PathBuf),

    /// Failed to write configuration file
    #[error("Failed to write configuration: {0}")]
    Write(String),

    /// Failed to serialize configuration
    #[error("Failed to serialize configuration: {0}")]
    Serialize(String),

    /// Failed to deserialize configuration
    #[error("Failed to deserialize configuration: {0}")]
    Deserialize(String),
}

/// Errors related to protocol lookup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// The scheme token does not name a known protocol
    #[error("Unknown protocol scheme: {0}")]
    UnknownScheme(String),
}

/// Errors related to stream list imports
#[derive(Debug, Error)]
pub enum ImportError {
    /// Failed to parse import source
    #[error("Failed to parse {source_name}: {reason}")]
    ParseError {
        /// The import source (e.g., "Stream list")
        source_name: String,
        /// The reason for parse failure
        reason: String,
    },

    /// Import source file not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
}

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
