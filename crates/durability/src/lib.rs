//! Durability primitives for shelfdb
//!
//! File-level mechanics under the storage layer:
//! - Layout: where a resource's primary, backup, and generation files live
//! - AtomicWriter: write-fsync-rename so readers only ever see complete files
//! - BackupManager: preserves the previous good content before a write lands
//!
//! Nothing here parses JSON. Structural validation and the recovery
//! decision live one layer up, in `shelf-storage`; this crate only moves
//! bytes around in ways that cannot lose the last known-good state.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod atomic;
pub mod backup;
pub mod layout;

pub use atomic::{cleanup_temp_files, AtomicWriter};
pub use backup::BackupManager;
pub use layout::DataLayout;
