//! Core data models for `StreamConn`
//!
//! This module defines the stream protocol table, the connection entry the
//! parser produces, and the saved form of an entry.

mod connection;
mod protocol;

pub use connection::{ConnectionEntry, SavedConnection};
pub use protocol::Protocol;
