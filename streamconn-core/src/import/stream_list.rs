//! Plain-text stream list importer.
//!
//! Reads one connection string per line, optionally prefixed by an alias:
//!
//! ```text
//! # lobby cameras
//! Lobby = rtsp://10.0.0.5:8554/stream1
//! Loading dock	rtsp://10.0.0.6/stream1
//! udp://239.1.1.1:5000
//! ```
//!
//! Blank lines and lines starting with `#` or `;` are ignored. A bare
//! connection string is aliased by its address.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::ImportError;
use crate::models::ConnectionEntry;
use crate::parser::parse_connection_string;

use super::traits::{ImportResult, ImportSource, SkippedEntry};

const SOURCE_NAME: &str = "Stream list";

/// Importer for plain-text stream lists
#[derive(Debug, Default, Clone, Copy)]
pub struct StreamListImporter;

impl StreamListImporter {
    /// Creates a new stream list importer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Parses stream list content and returns an import result
    #[must_use]
    pub fn parse_list(&self, content: &str, source_path: &str) -> ImportResult {
        let mut result = ImportResult::new();

        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            match Self::parse_line(line) {
                Some(entry) => result.add_entry(entry),
                None => result.add_skipped(SkippedEntry::with_location(
                    format!("line {}", line_num + 1),
                    format!("Invalid connection string: {line}"),
                    source_path,
                )),
            }
        }

        debug!(
            source = source_path,
            imported = result.entries.len(),
            skipped = result.skipped.len(),
            "Parsed stream list"
        );
        result
    }

    /// Parses a single non-comment line
    fn parse_line(line: &str) -> Option<ConnectionEntry> {
        let (alias, url) = Self::split_alias(line);
        match alias {
            Some(alias) => parse_connection_string(alias, url),
            None => {
                let entry = parse_connection_string("", url)?;
                let alias = entry.address().to_string();
                Some(entry.with_alias(alias))
            }
        }
    }

    /// Splits `alias = url` or `alias<TAB>url`
    ///
    /// Only a separator before the scheme counts, so `=` inside a query string
    /// is never mistaken for one.
    fn split_alias(line: &str) -> (Option<&str>, &str) {
        let scheme_start = line.find("://").unwrap_or(line.len());
        match line[..scheme_start].rfind(['=', '\t']) {
            Some(sep) => {
                let alias = line[..sep].trim();
                let url = line[sep + 1..].trim();
                ((!alias.is_empty()).then_some(alias), url)
            }
            None => (None, line),
        }
    }
}

impl ImportSource for StreamListImporter {
    fn source_id(&self) -> &'static str {
        "stream_list"
    }

    fn display_name(&self) -> &'static str {
        SOURCE_NAME
    }

    fn import_from_path(&self, path: &Path) -> Result<ImportResult, ImportError> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ImportError::ParseError {
            source_name: SOURCE_NAME.to_string(),
            reason: format!("Failed to read {}: {}", path.display(), e),
        })?;

        let result = self.parse_list(&content, &path.display().to_string());
        info!(path = %path.display(), "{}", result.summary());
        Ok(result)
    }
}
