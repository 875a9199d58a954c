//! Corruption-aware file store
//!
//! Loads and persists a resource's array of records:
//!
//! - `load`: parse the primary; on any structural failure, take the
//!   recovery branch — validate the `.bak`, rewrite the primary with its
//!   content, and hand the restored records back. Only when both copies
//!   are unusable does the caller see `Error::Unrecoverable`.
//! - `persist`: serialize, copy the current primary aside, then write
//!   atomically. `persist` is only called after a successful `load`, so
//!   the backup always captures known-good content.
//!
//! The store is oblivious to locking. Callers (the engine) hold the
//! resource's lock across the whole load-mutate-persist cycle.

use crate::parse::{parse_records, ParseError};
use shelf_core::{Error, Record, Resource, Result};
use shelf_durability::{AtomicWriter, BackupManager, DataLayout};
use tracing::{error, info, warn};

/// Options for a [`FileStore`]
#[derive(Debug, Clone)]
pub struct FileStoreOptions {
    /// fsync temp files and directories on every write
    pub fsync: bool,
    /// Indent the on-disk JSON (matches the historical file format)
    pub pretty: bool,
    /// Write timestamped generation backups alongside the `.bak`
    pub generations: bool,
}

impl Default for FileStoreOptions {
    fn default() -> Self {
        FileStoreOptions {
            fsync: true,
            pretty: true,
            generations: true,
        }
    }
}

/// Reads and writes resource files with transparent backup recovery
#[derive(Debug)]
pub struct FileStore {
    layout: DataLayout,
    writer: AtomicWriter,
    backups: BackupManager,
    pretty: bool,
}

impl FileStore {
    /// Create a file store over a layout
    pub fn new(layout: DataLayout, options: FileStoreOptions) -> Self {
        let writer = if options.fsync {
            AtomicWriter::new()
        } else {
            AtomicWriter::without_fsync()
        };
        let backups = BackupManager::new(layout.clone(), options.generations);
        FileStore {
            layout,
            writer,
            backups,
            pretty: options.pretty,
        }
    }

    /// The layout this store operates on
    pub fn layout(&self) -> &DataLayout {
        &self.layout
    }

    /// Whether the resource's primary file exists
    pub fn exists(&self, resource: &Resource) -> bool {
        self.layout.primary_path(resource).exists()
    }

    /// Load a resource's records, recovering from backup if the primary
    /// is corrupted
    ///
    /// An absent primary is an empty resource, not an error.
    pub fn load(&self, resource: &Resource) -> Result<Vec<Record>> {
        let primary = self.layout.primary_path(resource);
        if !primary.exists() {
            return Ok(Vec::new());
        }

        let bytes = std::fs::read(&primary)?;
        match parse_records(&bytes) {
            Ok(records) => Ok(records),
            Err(reason) => self.recover(resource, &reason),
        }
    }

    /// Persist a resource's records: backup, then atomic write
    pub fn persist(&self, resource: &Resource, records: &[Record]) -> Result<()> {
        let bytes = self.serialize(records)?;
        self.backups.backup(resource)?;
        self.writer
            .write(&self.layout.primary_path(resource), &bytes)?;
        Ok(())
    }

    /// Explicitly restore a resource from its `.bak` sibling
    ///
    /// Validates the backup, rewrites the primary with its content, and
    /// returns the restored records. Fails with [`Error::Unrecoverable`]
    /// when the backup is missing or itself corrupted.
    pub fn restore_from_backup(&self, resource: &Resource) -> Result<Vec<Record>> {
        let backup_path = self.layout.backup_path(resource);

        let bytes = match std::fs::read(&backup_path) {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(
                    resource = %resource,
                    error = %e,
                    "backup unreadable, resource is unrecoverable"
                );
                return Err(Error::Unrecoverable {
                    resource: resource.to_string(),
                });
            }
        };

        let records = match parse_records(&bytes) {
            Ok(records) => records,
            Err(reason) => {
                error!(
                    resource = %resource,
                    %reason,
                    "backup is corrupted, resource is unrecoverable"
                );
                return Err(Error::Unrecoverable {
                    resource: resource.to_string(),
                });
            }
        };

        // Rewrite the primary so subsequent reads see the restored state
        // on disk, not just in memory
        let serialized = self.serialize(&records)?;
        self.writer
            .write(&self.layout.primary_path(resource), &serialized)?;

        info!(
            resource = %resource,
            records = records.len(),
            "restored from backup"
        );
        Ok(records)
    }

    /// Recovery branch for a primary that failed to parse
    fn recover(&self, resource: &Resource, reason: &ParseError) -> Result<Vec<Record>> {
        warn!(
            resource = %resource,
            %reason,
            "primary failed to parse, attempting restore from backup"
        );
        self.restore_from_backup(resource)
    }

    /// Serialize records in the on-disk format
    fn serialize(&self, records: &[Record]) -> Result<Vec<u8>> {
        let result = if self.pretty {
            serde_json::to_vec_pretty(records)
        } else {
            serde_json::to_vec(records)
        };
        result.map_err(|e| Error::Serialization(e.to_string()))
    }
}
