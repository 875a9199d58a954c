//! Per-resource locking for shelfdb
//!
//! The atomic writer only guarantees atomicity of a single file write.
//! A read-modify-write cycle spans a read, an in-memory mutation, a
//! backup copy, and a write — two concurrent callers interleaving those
//! steps on the same resource would lose updates. The lock table closes
//! that gap: one mutex per resource name, held for the whole cycle.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod table;

pub use table::LockTable;
