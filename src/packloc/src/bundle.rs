//! Translation bundle assembly

use serde_json::{Map, Value};

use crate::mapping::MappingTable;

/// One category's translation bundle under construction.
///
/// Serialized key order is meaningful and fixed: `label`, `folders` (only
/// for folder-bearing collections), `entries`, `mapping`.
#[derive(Debug)]
pub struct Bundle {
    pub label: String,
    pub folders: Option<Map<String, Value>>,
    pub entries: Map<String, Value>,
    pub mapping: MappingTable,
}

impl Bundle {
    pub fn new(category: &str, folder_bearing: bool) -> Self {
        Self {
            label: title_case(category),
            folders: folder_bearing.then(Map::new),
            entries: Map::new(),
            mapping: MappingTable::new(),
        }
    }

    /// Record a folder name, creating the `folders` field on demand.
    ///
    /// Per-record folder detection can fire even when the witness did not
    /// mark the collection folder-bearing.
    pub fn add_folder(&mut self, name: &str) {
        self.folders
            .get_or_insert_with(Map::new)
            .insert(name.to_string(), Value::String(name.to_string()));
    }

    pub fn into_value(self) -> Value {
        let mut root = Map::new();
        root.insert("label".to_string(), Value::String(self.label));
        if let Some(folders) = self.folders {
            root.insert("folders".to_string(), Value::Object(folders));
        }
        root.insert("entries".to_string(), Value::Object(self.entries));
        root.insert("mapping".to_string(), self.mapping.into_value());
        Value::Object(root)
    }
}

/// Title-case a category name for the bundle label: the first letter of
/// every alphabetic run is uppercased, the rest lowercased.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut word_start = true;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            word_start = false;
        } else {
            out.push(ch);
            word_start = true;
        }
    }
    out
}
