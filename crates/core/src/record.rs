//! Record type for array-shaped resources
//!
//! A record is one JSON object inside a resource's array. The engine is
//! schema-agnostic: it never interprets record fields beyond the `id`
//! used for indexed operations. Type-checked projection into concrete
//! request/response structs happens at the caller boundary, not here.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::ops::{Deref, DerefMut};

/// Field that uniquely identifies a record within its resource
pub const ID_FIELD: &str = "id";

/// Field stamped by the store on insert when the caller didn't set it
pub const CREATED_AT_FIELD: &str = "created_at";

/// One schema-agnostic JSON object inside a resource's array
///
/// Newtype around `serde_json::Map` providing:
/// - Direct access to the underlying map via `Deref`/`DerefMut`
/// - Typed access to the `id` field
/// - Serialization that is transparent (a record IS its JSON object)
///
/// # Examples
///
/// ```
/// use shelf_core::Record;
/// use serde_json::json;
///
/// let mut record = Record::from_value(json!({"name": "Ana"})).unwrap();
/// assert!(record.id().is_none());
///
/// record.set_id("s-1".to_string());
/// assert_eq!(record.id(), Some("s-1"));
/// assert_eq!(record["name"], json!("Ana"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Record(Map::new())
    }

    /// Create a record from an existing map
    pub fn from_map(map: Map<String, Value>) -> Self {
        Record(map)
    }

    /// Create a record from a JSON value, rejecting anything that is
    /// not an object
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Record(map)),
            other => Err(Error::InvalidRecord(format!(
                "expected a JSON object, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Consume the record, returning the underlying JSON value
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// The record's `id`, if it carries one
    ///
    /// Ids are strings by contract; a non-string `id` field is treated
    /// as absent.
    pub fn id(&self) -> Option<&str> {
        self.0.get(ID_FIELD).and_then(Value::as_str)
    }

    /// Set the record's `id`, replacing any existing value
    pub fn set_id(&mut self, id: String) {
        self.0.insert(ID_FIELD.to_string(), Value::String(id));
    }

    /// The record's `created_at` timestamp, if it carries one
    pub fn created_at(&self) -> Option<&str> {
        self.0.get(CREATED_AT_FIELD).and_then(Value::as_str)
    }

    /// Set a field, replacing any existing value
    pub fn set(&mut self, field: &str, value: Value) {
        self.0.insert(field.to_string(), value);
    }
}

impl Deref for Record {
    type Target = Map<String, Value>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Record {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Record(map)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::Object(self.0.clone()))
    }
}

/// Human-readable name for a JSON value's type, used in error messages
fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
