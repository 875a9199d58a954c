//! Error types for shelfdb
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Two conditions are deliberately NOT errors:
//! - A missing record: `get_by_id`/`update` return `Ok(None)` and `delete`
//!   returns `Ok(false)`. Absence is a normal outcome, not control flow.
//! - Recovered corruption: a primary file that fails to parse but is
//!   restored from its backup is handled inside the storage layer and
//!   never surfaces to callers.

use crate::resource::ResourceNameError;
use std::io;
use thiserror::Error;

/// Result type alias for shelfdb operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the shelfdb storage engine
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error (file write, rename, copy, directory sync)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Serialization error while encoding records for disk
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Primary file failed to parse as an array of records
    ///
    /// Internal signal between the reader and the recovery branch.
    /// Callers only see it when recovery itself is impossible, in which
    /// case it has already been upgraded to [`Error::Unrecoverable`].
    #[error("Resource '{resource}' is corrupted: {reason}")]
    Corruption {
        /// Resource whose primary file failed to parse
        resource: String,
        /// What the parser rejected
        reason: String,
    },

    /// Primary and backup are both missing or corrupted
    ///
    /// Fatal for operations on this resource. Never silently replaced
    /// by fabricated empty data.
    #[error("Resource '{resource}': primary and backup are both missing or corrupted")]
    Unrecoverable {
        /// Resource that cannot be restored
        resource: String,
    },

    /// A record that is not a JSON object was handed to the store
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// Resource name failed validation
    #[error(transparent)]
    InvalidResourceName(#[from] ResourceNameError),
}
