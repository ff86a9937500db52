//! Connection descriptor produced from a stream connection string.

use std::fmt;
use std::net::IpAddr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::protocol::Protocol;

/// A fully resolved stream endpoint
///
/// Entries are built by [`crate::parse_connection_string`] and never change
/// afterwards: every field is read through an accessor. The address is never
/// empty and the port is always populated, falling back to
/// [`Protocol::default_port`] when the source string names none.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionEntry {
    alias: String,
    protocol: Protocol,
    address: String,
    port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    path: Option<String>,
}

impl ConnectionEntry {
    pub(crate) const fn new(
        alias: String,
        protocol: Protocol,
        address: String,
        port: u16,
        path: Option<String>,
    ) -> Self {
        Self {
            alias,
            protocol,
            address,
            port,
            path,
        }
    }

    /// Caller-supplied label, copied verbatim
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Protocol named by the scheme
    pub const fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// Host name or IP literal
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Explicit or default port
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Path and query after the authority, always starting with `/`
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Returns a copy of this entry under a different alias
    #[must_use]
    pub fn with_alias(&self, alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            ..self.clone()
        }
    }

    /// Returns true if the address is a multicast IP literal
    pub fn is_multicast(&self) -> bool {
        self.address
            .parse::<IpAddr>()
            .is_ok_and(|ip| ip.is_multicast())
    }

    /// Renders the canonical `scheme://address:port[path]` form
    ///
    /// Parsing the result again under the same alias yields an equal entry.
    pub fn to_url(&self) -> String {
        format!(
            "{}://{}:{}{}",
            self.protocol.as_str(),
            self.address,
            self.port,
            self.path.as_deref().unwrap_or_default()
        )
    }
}

impl fmt::Display for ConnectionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_url())
    }
}

/// A connection entry persisted in `connections.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedConnection {
    /// Unique identifier for the saved entry
    pub id: Uuid,
    /// Timestamp when the entry was saved
    pub created_at: DateTime<Utc>,
    /// Timestamp when the entry was last modified
    pub updated_at: DateTime<Utc>,
    /// The resolved stream endpoint
    pub entry: ConnectionEntry,
}

impl SavedConnection {
    /// Wraps an entry with a fresh id and timestamps
    #[must_use]
    pub fn new(entry: ConnectionEntry) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            entry,
        }
    }

    /// Alias of the wrapped entry
    pub fn alias(&self) -> &str {
        self.entry.alias()
    }

    /// Replaces the alias of the wrapped entry
    pub fn rename(&mut self, alias: impl Into<String>) {
        self.entry = self.entry.with_alias(alias);
        self.touch();
    }

    /// Updates the `updated_at` timestamp to now
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
