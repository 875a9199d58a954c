//! Lock table mapping resource names to mutexes
//!
//! One lock per resource name, created lazily on first access and kept
//! for the life of the table. Locks are never removed: resource names
//! are a small, bounded, known set, so the table stays tiny and a handle
//! once created stays valid for every later caller.
//!
//! Acquisition blocks until the lock is available — no timeout. A holder
//! is expected to release promptly; nothing inside a critical section
//! blocks on anything other than the resource's own file I/O.
//!
//! Re-entrant acquisition is not supported. A caller that re-enters
//! `with_lock` for the same resource from inside the closure will
//! deadlock, exactly like `parking_lot::Mutex`.

use dashmap::DashMap;
use parking_lot::Mutex;
use shelf_core::Resource;
use std::sync::Arc;

/// Map from resource name to its exclusive lock
///
/// Owned by the store instance and passed down by reference — there is
/// no process-global table. Two stores over different data directories
/// never share locks.
#[derive(Debug, Default)]
pub struct LockTable {
    locks: DashMap<Resource, Arc<Mutex<()>>>,
}

impl LockTable {
    /// Create an empty lock table
    pub fn new() -> Self {
        LockTable {
            locks: DashMap::new(),
        }
    }

    /// Get or create the lock handle for a resource
    fn handle(&self, resource: &Resource) -> Arc<Mutex<()>> {
        if let Some(existing) = self.locks.get(resource) {
            return Arc::clone(&existing);
        }
        self.locks
            .entry(resource.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Run `f` with exclusive access to the named resource
    ///
    /// Operations on different resource names run without mutual
    /// blocking. The lock is released on every exit path, including
    /// panics unwinding out of `f`.
    pub fn with_lock<R>(&self, resource: &Resource, f: impl FnOnce() -> R) -> R {
        let handle = self.handle(resource);
        let _guard = handle.lock();
        f()
    }

    /// Number of resources that have been locked at least once
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    /// Whether no resource has been locked yet
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
