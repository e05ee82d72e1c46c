//! Store-to-JSON dumping
//!
//! Each category store is dumped as a JSON array of its decoded values to
//! `<category>.json` in the output directory. The dump is the input format
//! of the bundle-construction stage.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

use crate::store::{list_categories, read_store};
use crate::Result;

/// Per-category dump summary
#[derive(Debug)]
pub struct DumpReport {
    pub category: String,
    pub records: usize,
    pub output: PathBuf,
}

/// A category whose store could not be read or whose dump could not be
/// written. The rest of the batch continues past it.
#[derive(Debug)]
pub struct CategoryFailure {
    pub category: String,
    pub error: crate::Error,
}

/// Outcome of dumping a whole store root
#[derive(Debug, Default)]
pub struct DumpOutcome {
    pub reports: Vec<DumpReport>,
    pub failures: Vec<CategoryFailure>,
}

/// Serialize a JSON value with 4-space indentation.
///
/// Non-ASCII characters are written literally, not escaped, so translated
/// text stays readable in the dump.
pub fn to_pretty_vec<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(buf)
}

/// Dump one category store to `<category>.json` under `out_dir`.
///
/// Creates the output directory if absent and overwrites an existing dump.
pub fn dump_category(store_root: &Path, category: &str, out_dir: &Path) -> Result<DumpReport> {
    let records = read_store(&store_root.join(category))?;
    let count = records.len();

    fs::create_dir_all(out_dir)?;
    let output = out_dir.join(format!("{category}.json"));
    fs::write(&output, to_pretty_vec(&Value::Array(records))?)?;

    info!(category, records = count, "dumped category store");
    Ok(DumpReport {
        category: category.to_string(),
        records: count,
        output,
    })
}

/// Dump every category store under `store_root` to `out_dir`.
///
/// A store-open or write failure is fatal for that category only; it is
/// recorded and the batch moves on to the next category.
pub fn dump_all(store_root: &Path, out_dir: &Path) -> Result<DumpOutcome> {
    let mut outcome = DumpOutcome::default();
    for category in list_categories(store_root)? {
        match dump_category(store_root, &category, out_dir) {
            Ok(report) => outcome.reports.push(report),
            Err(err) => {
                error!(category, %err, "category dump failed");
                outcome.failures.push(CategoryFailure { category, error: err });
            }
        }
    }
    Ok(outcome)
}
