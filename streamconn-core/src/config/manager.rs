//! Configuration manager for TOML file operations
//!
//! This module provides the `ConfigManager` which handles loading and saving
//! the saved connection list and application settings.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{ConfigError, ConfigResult};
use crate::models::SavedConnection;
use crate::parser::parse_connection_string;

use super::settings::AppSettings;

/// File names for configuration files
const CONNECTIONS_FILE: &str = "connections.toml";
const CONFIG_FILE: &str = "config.toml";

/// Wrapper for serializing a list of saved connections
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
struct ConnectionsFile {
    #[serde(default)]
    connections: Vec<SavedConnection>,
}

/// Configuration manager for `StreamConn`
///
/// Handles loading and saving configuration files in TOML format.
/// Configuration is stored in `~/.config/streamconn/` by default.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    /// Base directory for configuration files
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Creates a new `ConfigManager` with the default configuration directory
    ///
    /// The default directory is `~/.config/streamconn/`
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration directory cannot be determined.
    pub fn new() -> ConfigResult<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::NotFound(PathBuf::from("~/.config")))?
            .join("streamconn");
        Ok(Self { config_dir })
    }

    /// Creates a new `ConfigManager` with a custom configuration directory
    ///
    /// This is useful for testing or non-standard configurations.
    #[must_use]
    pub const fn with_config_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    /// Returns the configuration directory path
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Ensures the configuration directory exists
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn ensure_config_dir(&self) -> ConfigResult<()> {
        if !self.config_dir.exists() {
            fs::create_dir_all(&self.config_dir).map_err(|e| {
                ConfigError::Write(format!(
                    "Failed to create config directory {}: {}",
                    self.config_dir.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    // ========== Connections ==========

    /// Loads saved connections from the configuration file
    ///
    /// Returns an empty vector if the file doesn't exist. Every loaded entry
    /// is checked with [`Self::validate_connection`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed, or if any
    /// entry in it is not a valid connection.
    pub fn load_connections(&self) -> ConfigResult<Vec<SavedConnection>> {
        let path = self.config_dir.join(CONNECTIONS_FILE);
        let connections = Self::load_toml_file::<ConnectionsFile>(&path)?.connections;

        if let Some((index, error)) = Self::validate_connections(&connections).into_iter().next() {
            warn!(index, path = %path.display(), %error, "Rejected invalid saved connection");
            return Err(match error {
                ConfigError::Validation { field, reason } => ConfigError::Validation {
                    field: format!("connections[{index}].{field}"),
                    reason,
                },
                other => other,
            });
        }

        debug!(count = connections.len(), path = %path.display(), "Loaded connections");
        Ok(connections)
    }

    /// Saves connections to the configuration file
    ///
    /// Creates the configuration directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_connections(&self, connections: &[SavedConnection]) -> ConfigResult<()> {
        self.ensure_config_dir()?;
        let path = self.config_dir.join(CONNECTIONS_FILE);
        let file = ConnectionsFile {
            connections: connections.to_vec(),
        };
        Self::save_toml_file(&path, &file)?;
        debug!(count = connections.len(), path = %path.display(), "Saved connections");
        Ok(())
    }

    /// Finds a saved connection by UUID or alias
    ///
    /// A key that parses as a UUID is matched against ids first; otherwise the
    /// first connection whose alias equals the key is returned.
    #[must_use]
    pub fn find_connection<'a>(
        connections: &'a [SavedConnection],
        key: &str,
    ) -> Option<&'a SavedConnection> {
        if let Ok(id) = Uuid::parse_str(key) {
            if let Some(found) = connections.iter().find(|c| c.id == id) {
                return Some(found);
            }
        }
        connections.iter().find(|c| c.alias() == key)
    }

    // ========== Settings ==========

    /// Loads application settings
    ///
    /// Returns default settings if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load_settings(&self) -> ConfigResult<AppSettings> {
        let path = self.config_dir.join(CONFIG_FILE);
        Self::load_toml_file(&path)
    }

    /// Saves application settings
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_settings(&self, settings: &AppSettings) -> ConfigResult<()> {
        self.ensure_config_dir()?;
        let path = self.config_dir.join(CONFIG_FILE);
        Self::save_toml_file(&path, settings)
    }

    // ========== Generic TOML Operations ==========

    /// Loads and parses a TOML file
    ///
    /// Returns the default value if the file doesn't exist.
    fn load_toml_file<T>(path: &Path) -> ConfigResult<T>
    where
        T: serde::de::DeserializeOwned + Default,
    {
        if !path.exists() {
            return Ok(T::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read {}: {}", path.display(), e)))?;

        toml::from_str(&content).map_err(|e| {
            ConfigError::Deserialize(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Saves data to a TOML file
    fn save_toml_file<T>(path: &Path, data: &T) -> ConfigResult<()>
    where
        T: serde::Serialize,
    {
        let content = toml::to_string_pretty(data)
            .map_err(|e| ConfigError::Serialize(format!("Failed to serialize: {e}")))?;

        fs::write(path, content)
            .map_err(|e| ConfigError::Write(format!("Failed to write {}: {}", path.display(), e)))
    }

    // ========== Validation ==========

    /// Validates a saved connection
    ///
    /// Entries built by the parser always pass; this guards against
    /// hand-edited `connections.toml` files. Beyond the per-field checks the
    /// entry must equal what its own canonical URL parses back to.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection is invalid.
    pub fn validate_connection(connection: &SavedConnection) -> ConfigResult<()> {
        let entry = &connection.entry;

        if entry.alias().trim().is_empty() {
            return Err(invalid("alias", "Alias cannot be empty"));
        }

        let address = entry.address();
        if address.trim().is_empty() {
            return Err(invalid("address", "Address cannot be empty"));
        }
        if address.contains("://") || address.contains(['@', '/', '?']) {
            return Err(invalid(
                "address",
                format!("Address '{address}' contains URL separators"),
            ));
        }
        if address.ends_with(':') || address.trim() != address {
            return Err(invalid(
                "address",
                format!("Address '{address}' has a dangling separator or whitespace"),
            ));
        }

        if entry.port() == 0 {
            return Err(invalid("port", "Port must be greater than 0"));
        }

        if let Some(path) = entry.path() {
            if !path.starts_with('/') || path == "/" || path == "/?" {
                return Err(invalid(
                    "path",
                    format!("Path '{path}' must start with '/' and name a resource"),
                ));
            }
        }

        let url = entry.to_url();
        if parse_connection_string(entry.alias(), &url).as_ref() != Some(entry) {
            return Err(invalid(
                "entry",
                format!("Entry does not match its canonical form {url}"),
            ));
        }

        Ok(())
    }

    /// Validates all connections and returns errors for invalid ones
    #[must_use]
    pub fn validate_connections(connections: &[SavedConnection]) -> Vec<(usize, ConfigError)> {
        connections
            .iter()
            .enumerate()
            .filter_map(|(i, conn)| Self::validate_connection(conn).err().map(|e| (i, e)))
            .collect()
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Validation {
        field: field.to_string(),
        reason: reason.into(),
    }
}
