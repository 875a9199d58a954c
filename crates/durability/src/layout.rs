//! On-disk layout of a data directory
//!
//! The layout is a compatibility contract:
//! - `<data_dir>/<resource>.json` — primary array file
//! - `<data_dir>/<resource>.json.bak` — previous good content
//! - `<data_dir>/backups/<resource>.json.<stamp>.bak` — timestamped
//!   generations, never pruned by the engine
//!
//! Resource names are validated before they get here (see
//! `shelf_core::Resource`), so every join below stays inside `data_dir`.

use shelf_core::Resource;
use std::io;
use std::path::{Path, PathBuf};

/// Name of the subdirectory holding timestamped generation backups
const BACKUPS_SUBDIR: &str = "backups";

/// Paths for a store's data directory
#[derive(Debug, Clone)]
pub struct DataLayout {
    data_dir: PathBuf,
    backups_dir: PathBuf,
}

impl DataLayout {
    /// Create a layout rooted at `data_dir`
    ///
    /// Does not touch the filesystem; call [`DataLayout::ensure_dirs`]
    /// before the first write.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let backups_dir = data_dir.join(BACKUPS_SUBDIR);
        DataLayout {
            data_dir,
            backups_dir,
        }
    }

    /// Create the data and backups directories if absent
    pub fn ensure_dirs(&self) -> io::Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(&self.backups_dir)?;
        Ok(())
    }

    /// The data directory
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// The timestamped-generations directory
    pub fn backups_dir(&self) -> &Path {
        &self.backups_dir
    }

    /// Path of a resource's primary array file
    pub fn primary_path(&self, resource: &Resource) -> PathBuf {
        self.data_dir.join(resource.file_name())
    }

    /// Path of a resource's `.bak` sibling
    pub fn backup_path(&self, resource: &Resource) -> PathBuf {
        self.data_dir.join(resource.backup_file_name())
    }

    /// Path of a timestamped generation copy
    pub fn generation_path(&self, resource: &Resource, stamp: &str) -> PathBuf {
        self.backups_dir
            .join(format!("{}.{}.bak", resource.file_name(), stamp))
    }
}
