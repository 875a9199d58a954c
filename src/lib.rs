//! shelfdb - Embedded JSON-file document store
//!
//! shelfdb persists named collections ("resources") as flat JSON array
//! files and layers database-like guarantees on top: atomic writes,
//! pre-write backups with transparent corruption recovery, and
//! per-resource locking for safe concurrent access within one process.
//!
//! # Quick Start
//!
//! ```no_run
//! use shelfdb::{Record, Resource, ResourceStore};
//! use serde_json::json;
//!
//! # fn main() -> shelfdb::Result<()> {
//! // Open a store over a data directory
//! let store = ResourceStore::open("./data")?;
//! let students = Resource::new("students")?;
//!
//! // Insert a record; the store assigns the id
//! let ana = store.insert(&students, Record::from_value(json!({"name": "Ana"}))?)?;
//!
//! // Retrieve it
//! let found = store.get_by_id(&students, ana.id().unwrap())?;
//! assert!(found.is_some());
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! All operations go through the [`ResourceStore`], which composes the
//! layered internals: per-resource locking, corruption-aware loading,
//! backup, and atomic file replacement. On disk, each resource is a
//! single `<resource>.json` array file with a `<resource>.json.bak`
//! sibling holding the previous good content.
//!
//! Internal implementation details (storage, concurrency, durability)
//! are not exposed — only the store API is public.

pub use shelf_core::{
    Error, Record, Resource, ResourceNameError, Result, CREATED_AT_FIELD, ID_FIELD,
};
pub use shelf_engine::{ResourceStore, StoreConfig};
