//! Core types for shelfdb
//!
//! This crate defines the foundational types used throughout the system:
//! - Resource: validated name of a file-backed collection
//! - Record: one schema-agnostic JSON object inside a resource's array
//! - Error: error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod record;
pub mod resource;

pub use error::{Error, Result};
pub use record::{Record, CREATED_AT_FIELD, ID_FIELD};
pub use resource::{Resource, ResourceNameError};
