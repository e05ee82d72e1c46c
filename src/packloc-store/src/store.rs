//! Category store access

use std::fs;
use std::path::Path;

use rusty_leveldb::{LdbIterator, Options, DB};
use serde_json::Value;

use crate::record::decode_record;
use crate::{Error, Result};

/// List the content categories under a store root.
///
/// Every immediate subdirectory is one category backed by its own store.
/// Names are returned sorted so batch runs are deterministic.
pub fn list_categories(store_root: &Path) -> Result<Vec<String>> {
    let mut categories = Vec::new();
    for entry in fs::read_dir(store_root)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            categories.push(entry.file_name().to_string_lossy().to_string());
        }
    }
    categories.sort();
    Ok(categories)
}

/// Read every value from the store at `path`, in native store order.
///
/// The store handle is scoped to this call and released on both the success
/// and failure paths when it is dropped.
pub fn read_store(path: &Path) -> Result<Vec<Value>> {
    let mut options = Options::default();
    options.create_if_missing = false;

    let mut db = DB::open(path, options).map_err(|err| Error::StoreOpen {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;

    let mut iter = db.new_iter().map_err(|err| Error::StoreIter {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;

    let mut records = Vec::new();
    while let Some((_key, value)) = iter.next() {
        records.push(decode_record(&value));
    }

    Ok(records)
}
