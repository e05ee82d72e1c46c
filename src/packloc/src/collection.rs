//! Document collections and the schema witness

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::{Error, Result};

/// The full ordered sequence of records from one category's store dump.
///
/// The first record (or, when the dump holds a bare mapping, that mapping
/// itself) is the schema witness: its key set decides which transformation
/// blocks apply to every record in the collection. Records are assumed
/// structurally homogeneous; divergence is detected during projection and
/// logged, not rejected.
#[derive(Debug)]
pub struct Collection {
    pub category: String,
    pub records: Vec<Value>,
}

impl Collection {
    /// Load a collection from a `<category>.json` dump file.
    ///
    /// The category name is the file name up to the first dot, matching the
    /// dump naming scheme.
    pub fn load(path: &Path) -> Result<Self> {
        let category = category_from_path(path)
            .ok_or_else(|| Error::DumpName(path.to_path_buf()))?;
        let text = fs::read_to_string(path)?;
        let data: Value = serde_json::from_str(&text)?;
        Self::from_value(category, data)
    }

    /// Build a collection from an already-parsed dump value.
    ///
    /// A bare mapping is treated as a single-record collection; it is then
    /// its own witness.
    pub fn from_value(category: String, data: Value) -> Result<Self> {
        let records = match data {
            Value::Array(records) => records,
            document @ Value::Object(_) => vec![document],
            other => {
                return Err(Error::InvalidDump {
                    category,
                    found: value_kind(&other),
                })
            }
        };
        Ok(Self { category, records })
    }

    /// The schema witness, when the collection is non-empty and its first
    /// record is a mapping.
    pub fn witness(&self) -> Option<&Map<String, Value>> {
        self.records.first().and_then(Value::as_object)
    }

    /// The witness's key set, in document order.
    pub fn witness_keys(&self) -> Vec<String> {
        self.witness()
            .map(|witness| witness.keys().cloned().collect())
            .unwrap_or_default()
    }
}

fn category_from_path(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let category = name.split('.').next()?;
    (!category.is_empty()).then(|| category.to_string())
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
