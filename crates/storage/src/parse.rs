//! Structural validation of a resource file
//!
//! A resource's on-disk representation is always a JSON array of
//! objects — never a single object, never a scalar, never `null`. Any
//! other shape is corruption, whether or not the bytes are valid JSON.
//!
//! Validation returns an explicit error value rather than throwing
//! through the caller: the recovery decision in `FileStore` is a
//! visible `match` branch, auditable and testable on its own.

use shelf_core::Record;
use serde_json::Value;
use thiserror::Error;

/// Why a resource file's content was rejected
#[derive(Debug, Error)]
pub enum ParseError {
    /// The bytes are not valid JSON at all
    #[error("invalid JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    /// Valid JSON, but the top level is not an array
    #[error("expected a JSON array, found {found}")]
    NotAnArray {
        /// Kind of the rejected top-level value
        found: &'static str,
    },

    /// An array element is not an object
    #[error("element {index} is not an object")]
    ElementNotAnObject {
        /// Index of the rejected element
        index: usize,
    },
}

/// Parse file content as an array of records
///
/// Returns the records in stored order, or the reason the content is
/// structurally invalid.
pub fn parse_records(bytes: &[u8]) -> Result<Vec<Record>, ParseError> {
    let value: Value = serde_json::from_slice(bytes)?;

    let elements = match value {
        Value::Array(elements) => elements,
        other => {
            return Err(ParseError::NotAnArray {
                found: kind_name(&other),
            })
        }
    };

    let mut records = Vec::with_capacity(elements.len());
    for (index, element) in elements.into_iter().enumerate() {
        match element {
            Value::Object(map) => records.push(Record::from_map(map)),
            _ => return Err(ParseError::ElementNotAnObject { index }),
        }
    }

    Ok(records)
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
