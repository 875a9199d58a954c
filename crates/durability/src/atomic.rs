//! Crash-safe file writer
//!
//! Uses the write-fsync-rename pattern:
//! 1. Write the payload to a hidden temp file (`.<file>.tmp`) in the
//!    same directory — same filesystem, so the final step is a
//!    metadata-only rename
//! 2. fsync the temp file
//! 3. Atomic rename onto the destination
//! 4. fsync the parent directory
//!
//! The rename is the only step that changes what readers see: a
//! concurrent open (or a crash at any point) observes either the old
//! complete content or the new complete content, never a partial file.
//!
//! A failure during the temp write removes the temp file and leaves the
//! destination untouched. A failure during rename leaves the
//! destination intact — the rename happened or it didn't.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// File writer with crash-safe semantics
#[derive(Debug, Clone)]
pub struct AtomicWriter {
    fsync: bool,
}

impl AtomicWriter {
    /// Create a writer that fsyncs the temp file and parent directory
    pub fn new() -> Self {
        AtomicWriter { fsync: true }
    }

    /// Create a writer that skips fsync
    ///
    /// The rename is still atomic with respect to concurrent opens, but
    /// a power loss can lose the write. For tests and ephemeral data.
    pub fn without_fsync() -> Self {
        AtomicWriter { fsync: false }
    }

    /// Whether this writer fsyncs
    pub fn fsyncs(&self) -> bool {
        self.fsync
    }

    /// Atomically replace `path` with `bytes`
    pub fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        let (dir, temp_path) = temp_path_for(path)?;

        // Step 1: write the payload to the temp file
        let mut file = OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(&temp_path)?;

        let written = file
            .write_all(bytes)
            .and_then(|_| if self.fsync { file.sync_all() } else { Ok(()) });
        drop(file);

        if let Err(e) = written {
            // Destination is untouched; don't leave the partial temp behind
            let _ = std::fs::remove_file(&temp_path);
            return Err(e);
        }

        // Step 3: atomic rename
        std::fs::rename(&temp_path, path)?;

        // Step 4: fsync parent directory so the rename itself is durable
        if self.fsync {
            let dir = File::open(dir)?;
            dir.sync_all()?;
        }

        Ok(())
    }
}

impl Default for AtomicWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Parent directory and temp-file path for a destination
///
/// The temp file is `.<file>.tmp` in the same directory.
fn temp_path_for(path: &Path) -> io::Result<(&Path, PathBuf)> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "path has no file name")
    })?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "path has no parent directory")
        })?;
    let temp_path = dir.join(format!(".{}.tmp", file_name.to_string_lossy()));
    Ok((dir, temp_path))
}

/// Remove stale temp files left behind by crashes
///
/// Called when a store opens. Returns the number of files removed.
pub fn cleanup_temp_files(dir: &Path) -> io::Result<usize> {
    let mut count = 0;

    if !dir.exists() {
        return Ok(0);
    }

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') && name.ends_with(".tmp") {
            std::fs::remove_file(entry.path())?;
            count += 1;
        }
    }

    Ok(count)
}
