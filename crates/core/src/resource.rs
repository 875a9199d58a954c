//! Resource names
//!
//! A resource is a named, file-backed collection of records acting as a
//! table. The name maps 1:1 to the backing file (`<name>.json`) and its
//! backup sibling (`<name>.json.bak`), so names are validated up front:
//! anything that could escape the data directory is rejected before it
//! ever reaches a path join.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Validated name of a file-backed collection
///
/// # Examples
///
/// ```
/// use shelf_core::Resource;
///
/// let students = Resource::new("students").unwrap();
/// assert_eq!(students.file_name(), "students.json");
/// assert_eq!(students.backup_file_name(), "students.json.bak");
///
/// assert!(Resource::new("../etc/passwd").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Resource(String);

impl Resource {
    /// Create a validated resource name
    ///
    /// Names must be non-empty and contain only ASCII alphanumerics,
    /// `_`, and `-`.
    pub fn new(name: impl Into<String>) -> Result<Self, ResourceNameError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ResourceNameError::Empty);
        }
        if let Some(ch) = name
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
        {
            return Err(ResourceNameError::InvalidCharacter { name, ch });
        }
        Ok(Resource(name))
    }

    /// The raw resource name
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of the primary array file
    pub fn file_name(&self) -> String {
        format!("{}.json", self.0)
    }

    /// File name of the backup sibling
    pub fn backup_file_name(&self) -> String {
        format!("{}.json.bak", self.0)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Resource {
    type Err = ResourceNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::new(s)
    }
}

impl TryFrom<String> for Resource {
    type Error = ResourceNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Resource::new(value)
    }
}

impl From<Resource> for String {
    fn from(resource: Resource) -> Self {
        resource.0
    }
}

/// Resource name validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceNameError {
    /// Name is empty
    #[error("Resource name must not be empty")]
    Empty,

    /// Name contains a character outside `[A-Za-z0-9_-]`
    #[error("Resource name '{name}' contains invalid character '{ch}'")]
    InvalidCharacter {
        /// The rejected name
        name: String,
        /// First offending character
        ch: char,
    },
}
