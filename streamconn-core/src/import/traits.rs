//! Import source trait and result types.
//!
//! This module defines the core abstractions for importing connection
//! strings in bulk, allowing different list formats to be implemented
//! uniformly.

use std::path::Path;

use crate::error::ImportError;
use crate::models::ConnectionEntry;

/// Result of an import operation containing successful imports and any issues encountered.
#[derive(Debug, Default)]
pub struct ImportResult {
    /// Successfully parsed entries
    pub entries: Vec<ConnectionEntry>,
    /// Entries that were skipped (invalid but non-fatal)
    pub skipped: Vec<SkippedEntry>,
    /// Errors encountered during import
    pub errors: Vec<ImportError>,
}

impl ImportResult {
    /// Creates a new empty import result
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of entries processed
    #[must_use]
    pub fn total_processed(&self) -> usize {
        self.entries.len() + self.skipped.len() + self.errors.len()
    }

    /// Returns true if the import had any errors
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns true if any entries were skipped
    #[must_use]
    pub fn has_skipped(&self) -> bool {
        !self.skipped.is_empty()
    }

    /// Returns a summary string of the import result
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Imported: {}, Skipped: {}, Errors: {}",
            self.entries.len(),
            self.skipped.len(),
            self.errors.len()
        )
    }

    /// Adds an entry to the result
    pub fn add_entry(&mut self, entry: ConnectionEntry) {
        self.entries.push(entry);
    }

    /// Adds a skipped entry to the result
    pub fn add_skipped(&mut self, entry: SkippedEntry) {
        self.skipped.push(entry);
    }

    /// Adds an error to the result
    pub fn add_error(&mut self, error: ImportError) {
        self.errors.push(error);
    }

    /// Merges another import result into this one
    pub fn merge(&mut self, other: Self) {
        self.entries.extend(other.entries);
        self.skipped.extend(other.skipped);
        self.errors.extend(other.errors);
    }
}

/// An entry that was skipped during import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    /// Identifier or name of the skipped entry
    pub identifier: String,
    /// Reason why the entry was skipped
    pub reason: String,
    /// Source location (file path, line number, etc.)
    pub location: Option<String>,
}

impl SkippedEntry {
    /// Creates a new skipped entry
    #[must_use]
    pub fn new(identifier: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            reason: reason.into(),
            location: None,
        }
    }

    /// Creates a new skipped entry with location information
    #[must_use]
    pub fn with_location(
        identifier: impl Into<String>,
        reason: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            reason: reason.into(),
            location: Some(location.into()),
        }
    }
}

/// Trait for import source implementations.
pub trait ImportSource: Send + Sync {
    /// Returns the unique identifier for this import source
    fn source_id(&self) -> &'static str;

    /// Returns a human-readable name for this import source
    fn display_name(&self) -> &'static str;

    /// Imports entries from a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the import fails completely (e.g., file not found).
    /// Partial failures (invalid lines) are recorded in the `ImportResult`.
    fn import_from_path(&self, path: &Path) -> Result<ImportResult, ImportError>;

    /// Imports entries from several paths, merging the results
    ///
    /// Paths that fail completely are recorded as errors instead of aborting
    /// the whole import.
    fn import_from_paths(&self, paths: &[&Path]) -> ImportResult {
        let mut combined = ImportResult::new();
        for path in paths {
            match self.import_from_path(path) {
                Ok(result) => combined.merge(result),
                Err(e) => combined.add_error(e),
            }
        }
        combined
    }
}
