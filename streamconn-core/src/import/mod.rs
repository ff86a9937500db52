//! Bulk import of connection strings.
//!
//! Every line of an import source goes through the same tolerant parser as a
//! single connection string; lines it rejects are reported as skipped.

mod stream_list;
mod traits;

pub use stream_list::StreamListImporter;
pub use traits::{ImportResult, ImportSource, SkippedEntry};
