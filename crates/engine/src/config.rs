//! Store configuration.
//!
//! This module provides configuration for the resource store.

/// Resource store configuration parameters.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// fsync temp files and the data directory on every write
    /// (default: true).
    ///
    /// Turning this off keeps the rename atomic with respect to
    /// concurrent opens but allows a power loss to drop the write.
    pub fsync: bool,

    /// Indent the on-disk JSON with two spaces (default: true).
    ///
    /// Matches the historical file format, so existing data files diff
    /// cleanly across writes.
    pub pretty: bool,

    /// Keep timestamped generation backups under `backups/` in addition
    /// to the `.bak` sibling (default: true).
    pub timestamped_backups: bool,

    /// Stamp `created_at` (RFC 3339, UTC) on inserted records that
    /// don't already carry one (default: true).
    pub stamp_created_at: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            fsync: true,
            pretty: true,
            timestamped_backups: true,
            stamp_created_at: true,
        }
    }
}

impl StoreConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set fsync behavior (builder pattern).
    pub fn with_fsync(mut self, fsync: bool) -> Self {
        self.fsync = fsync;
        self
    }

    /// Set pretty-printing (builder pattern).
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Set timestamped generation backups (builder pattern).
    pub fn with_timestamped_backups(mut self, enabled: bool) -> Self {
        self.timestamped_backups = enabled;
        self
    }

    /// Set `created_at` stamping (builder pattern).
    pub fn with_stamp_created_at(mut self, enabled: bool) -> Self {
        self.stamp_created_at = enabled;
        self
    }

    /// Create a configuration optimized for testing (no fsync).
    pub fn for_testing() -> Self {
        StoreConfig {
            fsync: false,
            ..StoreConfig::default()
        }
    }
}
