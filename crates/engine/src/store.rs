//! Resource store: the collection API
//!
//! The only interface business-logic callers are expected to use.
//! Every operation runs under the resource's lock for its full
//! duration, so a mutating call is one totally-ordered
//! read-modify-write cycle:
//!
//! ```text
//! acquire lock → load (with recovery) → mutate in memory
//!              → backup current primary → atomic write → release lock
//! ```
//!
//! The lock is released on every exit path (the critical section is a
//! closure), and the on-disk file is always the last successfully
//! written state — fully old or fully new, never partial. Operations on
//! different resources never block each other.

use crate::config::StoreConfig;
use chrono::{SecondsFormat, Utc};
use shelf_concurrency::LockTable;
use shelf_core::{Record, Resource, Result, CREATED_AT_FIELD};
use shelf_durability::{cleanup_temp_files, DataLayout};
use shelf_storage::{FileStore, FileStoreOptions};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use uuid::Uuid;

/// Concurrent, crash-safe store of named, array-shaped JSON resources
///
/// Create one with [`ResourceStore::open`] and share it (behind an
/// `Arc`) with every collaborator — the lock table lives inside the
/// instance, so all access to a data directory must go through the same
/// store.
///
/// # Example
///
/// ```no_run
/// use shelf_engine::ResourceStore;
/// use shelf_core::{Record, Resource};
/// use serde_json::json;
///
/// # fn main() -> shelf_core::Result<()> {
/// let store = ResourceStore::open("/var/lib/gym/data")?;
/// let students = Resource::new("students")?;
///
/// let ana = store.insert(&students, Record::from_value(json!({"name": "Ana"}))?)?;
/// let found = store.get_by_id(&students, ana.id().unwrap())?;
/// assert!(found.is_some());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ResourceStore {
    files: FileStore,
    locks: LockTable,
    config: StoreConfig,
    data_dir: PathBuf,
}

impl ResourceStore {
    /// Open a store at the given data directory with default config
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open_with_config(path, StoreConfig::default())
    }

    /// Open a store with a specific configuration
    ///
    /// # Flow
    ///
    /// 1. Create the data directory and `backups/` subdirectory
    /// 2. Sweep temp files left by interrupted writes
    /// 3. Return a ready store
    pub fn open_with_config(path: impl Into<PathBuf>, config: StoreConfig) -> Result<Self> {
        let data_dir = path.into();
        let layout = DataLayout::new(&data_dir);
        layout.ensure_dirs()?;

        let swept = cleanup_temp_files(layout.data_dir())?;
        if swept > 0 {
            warn!(
                count = swept,
                "removed temp files left by an interrupted write"
            );
        }

        let files = FileStore::new(
            layout,
            FileStoreOptions {
                fsync: config.fsync,
                pretty: config.pretty,
                generations: config.timestamped_backups,
            },
        );

        info!(data_dir = %data_dir.display(), "resource store open");

        Ok(ResourceStore {
            files,
            locks: LockTable::new(),
            config,
            data_dir,
        })
    }

    /// The data directory this store operates on
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// The configuration this store was opened with
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // ========================================================================
    // Read operations
    // ========================================================================

    /// All records of a resource, in insertion order
    ///
    /// Takes the resource's lock for a consistent snapshot: a read never
    /// observes the middle of another caller's read-modify-write cycle.
    pub fn list_all(&self, resource: &Resource) -> Result<Vec<Record>> {
        self.locks
            .with_lock(resource, || self.files.load(resource))
    }

    /// Records matching a caller-supplied predicate, in insertion order
    ///
    /// The engine stays schema-agnostic: filtering on record fields is
    /// the caller's business, expressed as a closure.
    pub fn find(
        &self,
        resource: &Resource,
        mut predicate: impl FnMut(&Record) -> bool,
    ) -> Result<Vec<Record>> {
        let records = self.list_all(resource)?;
        Ok(records.into_iter().filter(|r| predicate(r)).collect())
    }

    /// The first record with the given id, if any
    ///
    /// Ids are expected to be unique; if duplicates somehow exist, the
    /// first match wins.
    pub fn get_by_id(&self, resource: &Resource, id: &str) -> Result<Option<Record>> {
        let records = self.list_all(resource)?;
        Ok(records.into_iter().find(|r| r.id() == Some(id)))
    }

    // ========================================================================
    // Mutating operations
    // ========================================================================

    /// Append a record to a resource
    ///
    /// Assigns a fresh v4 uuid `id` if the record doesn't carry one, and
    /// stamps `created_at` (RFC 3339, UTC) if enabled and absent.
    /// Returns the stored record.
    pub fn insert(&self, resource: &Resource, record: Record) -> Result<Record> {
        self.locks.with_lock(resource, || {
            let mut records = self.files.load(resource)?;
            let record = self.prepare(record);
            records.push(record.clone());
            self.files.persist(resource, &records)?;
            Ok(record)
        })
    }

    /// Append several records in one read-modify-write cycle
    ///
    /// All records land in a single write: a crash either persists the
    /// whole batch or none of it.
    pub fn insert_many(
        &self,
        resource: &Resource,
        batch: impl IntoIterator<Item = Record>,
    ) -> Result<Vec<Record>> {
        self.locks.with_lock(resource, || {
            let mut records = self.files.load(resource)?;
            let mut stored = Vec::new();
            for record in batch {
                let record = self.prepare(record);
                records.push(record.clone());
                stored.push(record);
            }
            if !stored.is_empty() {
                self.files.persist(resource, &records)?;
            }
            Ok(stored)
        })
    }

    /// Apply a mutation to the first record with the given id
    ///
    /// Rewrites the full array on success. Returns `Ok(None)` without
    /// writing when no record matches. The mutator cannot change the
    /// record's `id` — it is reasserted after the closure runs.
    pub fn update(
        &self,
        resource: &Resource,
        id: &str,
        mutator: impl FnOnce(&mut Record),
    ) -> Result<Option<Record>> {
        self.locks.with_lock(resource, || {
            let mut records = self.files.load(resource)?;
            let position = match records.iter().position(|r| r.id() == Some(id)) {
                Some(position) => position,
                None => return Ok(None),
            };

            mutator(&mut records[position]);
            records[position].set_id(id.to_string());

            self.files.persist(resource, &records)?;
            Ok(Some(records[position].clone()))
        })
    }

    /// Remove the first record with the given id
    ///
    /// Returns whether a removal occurred. A no-op delete short-circuits
    /// without touching the file.
    pub fn delete(&self, resource: &Resource, id: &str) -> Result<bool> {
        self.locks.with_lock(resource, || {
            let mut records = self.files.load(resource)?;
            let position = match records.iter().position(|r| r.id() == Some(id)) {
                Some(position) => position,
                None => return Ok(false),
            };

            records.remove(position);
            self.files.persist(resource, &records)?;
            Ok(true)
        })
    }

    // ========================================================================
    // Administrative operations
    // ========================================================================

    /// Initialize a resource's primary file to `[]` if absent
    pub fn ensure_resource(&self, resource: &Resource) -> Result<()> {
        self.locks.with_lock(resource, || {
            if !self.files.exists(resource) {
                self.files.persist(resource, &[])?;
            }
            Ok(())
        })
    }

    /// Explicitly roll a resource back to its `.bak` content
    ///
    /// Returns the restored records. Fails with
    /// [`shelf_core::Error::Unrecoverable`] when the backup is missing
    /// or corrupted.
    pub fn restore(&self, resource: &Resource) -> Result<Vec<Record>> {
        self.locks
            .with_lock(resource, || self.files.restore_from_backup(resource))
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Fill in server-assigned fields on an incoming record
    fn prepare(&self, mut record: Record) -> Record {
        if record.id().is_none() {
            record.set_id(Uuid::new_v4().to_string());
        }
        if self.config.stamp_created_at && record.created_at().is_none() {
            let stamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
            record.set(CREATED_AT_FIELD, Value::String(stamp));
        }
        record
    }
}
