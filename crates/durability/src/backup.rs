//! Backup manager
//!
//! Before any write lands, the current primary is copied to its `.bak`
//! sibling. The sibling may lag the primary by exactly one write; at any
//! point it holds content that was the complete primary at some earlier
//! moment. The caller is responsible for only invoking [`BackupManager::backup`]
//! when the primary is known-good (i.e. after a successful load), so a
//! corrupt primary can never clobber a good backup.
//!
//! In addition to the `.bak` sibling, a timestamped generation copy goes
//! into the `backups/` subdirectory. Generations are best-effort — their
//! failure never fails the write — and are never pruned by the engine
//! (bounded by write volume, unlike the `.bak` which is bounded by the
//! number of resources).

use crate::layout::DataLayout;
use chrono::Utc;
use shelf_core::Resource;
use std::io;
use tracing::debug;

/// Format of generation file stamps (`20240501_101500`)
const GENERATION_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Copies the previous good content aside before a write
#[derive(Debug, Clone)]
pub struct BackupManager {
    layout: DataLayout,
    generations: bool,
}

impl BackupManager {
    /// Create a backup manager over a layout
    ///
    /// `generations` controls the timestamped copies; the `.bak` sibling
    /// is always written.
    pub fn new(layout: DataLayout, generations: bool) -> Self {
        BackupManager {
            layout,
            generations,
        }
    }

    /// Preserve the resource's current primary before a write
    ///
    /// Copies `<resource>.json` to `<resource>.json.bak`, and to a
    /// timestamped generation file when enabled. No-op when the primary
    /// does not exist yet (first write). Returns whether a backup was
    /// taken.
    pub fn backup(&self, resource: &Resource) -> io::Result<bool> {
        let primary = self.layout.primary_path(resource);
        if !primary.exists() {
            return Ok(false);
        }

        std::fs::copy(&primary, self.layout.backup_path(resource))?;

        if self.generations {
            let stamp = Utc::now().format(GENERATION_STAMP_FORMAT).to_string();
            let generation = self.layout.generation_path(resource, &stamp);
            if let Err(e) = std::fs::copy(&primary, &generation) {
                debug!(
                    resource = %resource,
                    error = %e,
                    "generation backup failed, continuing"
                );
            }
        }

        Ok(true)
    }

    /// Whether a `.bak` sibling exists for the resource
    pub fn has_backup(&self, resource: &Resource) -> bool {
        self.layout.backup_path(resource).exists()
    }

    /// The layout this manager operates on
    pub fn layout(&self) -> &DataLayout {
        &self.layout
    }
}
