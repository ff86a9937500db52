//! `StreamConn` Core Library
//!
//! This crate turns hand-written stream connection strings such as
//! `udp://@239.1.1.1:1234/` or `rtsp://cam.local/live?profile=1` into
//! normalized [`ConnectionEntry`] values, and provides the configuration and
//! import layers used to keep lists of them.

pub mod config;
pub mod error;
pub mod import;
pub mod models;
pub mod parser;

pub use config::{AppSettings, ConfigManager};
pub use error::{ConfigError, ConfigResult, ImportError, ProtocolError};
pub use import::{ImportResult, ImportSource, SkippedEntry, StreamListImporter};
pub use models::{ConnectionEntry, Protocol, SavedConnection};
pub use parser::parse_connection_string;
