//! Per-category pipeline driver
//!
//! Wires the stages together for one category dump and for whole dump
//! directories: load → classify → project → strip reference labels → clean
//! → write. Each category runs to completion before the next; a fatal
//! category error is reported and the batch moves on.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{error, info};
use walkdir::WalkDir;

use crate::clean::clean;
use crate::collection::Collection;
use crate::project::project;
use crate::refs::strip_reference_labels;
use crate::shape::CollectionShape;
use crate::write::write_bundle;
use crate::Result;

const SIDECAR_SUFFIX: &str = "_folders.json";

/// Summary of one processed category
#[derive(Debug)]
pub struct CategoryReport {
    pub category: String,
    /// The schema witness's key set, kept for batch diagnostics
    pub witness_keys: Vec<String>,
    pub entries: usize,
    pub folders: usize,
    pub skipped: usize,
    pub divergent: usize,
    pub output: PathBuf,
}

/// A category whose dump could not be processed end to end
#[derive(Debug)]
pub struct CategoryFailure {
    pub category: String,
    pub error: crate::Error,
}

/// Outcome of a whole dump-directory run
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub reports: Vec<CategoryReport>,
    pub failures: Vec<CategoryFailure>,
}

/// Run the full pipeline for one category dump file.
pub fn process_category(
    dump_path: &Path,
    out_dir: &Path,
    version: &str,
) -> Result<CategoryReport> {
    let collection = Collection::load(dump_path)?;
    let witness_keys = collection.witness_keys();
    info!(
        category = %collection.category,
        records = collection.records.len(),
        "processing category"
    );

    let sidecar = load_sidecar_folders(dump_path, &collection.category)?;
    let shape = CollectionShape::detect(
        &collection.category,
        collection.witness(),
        sidecar.is_some(),
    );

    let projection = project(&collection, &shape, sidecar.as_deref().unwrap_or(&[]));
    let skipped = projection.skipped;
    let divergent = projection.divergent;

    let mut bundle = projection.bundle.into_value();
    strip_reference_labels(&mut bundle);
    let bundle = clean(bundle);

    let entries = count_keys(&bundle, "entries");
    let folders = count_keys(&bundle, "folders");
    let output = write_bundle(out_dir, version, &collection.category, &bundle)?;

    Ok(CategoryReport {
        category: collection.category,
        witness_keys,
        entries,
        folders,
        skipped,
        divergent,
        output,
    })
}

/// Process every category dump under `dump_dir`.
///
/// Sidecar `*_folders.json` files are consumed next to their category dump
/// and are never treated as categories themselves.
pub fn process_dir(dump_dir: &Path, out_dir: &Path, version: &str) -> BatchOutcome {
    let mut dumps: Vec<PathBuf> = WalkDir::new(dump_dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|path| is_category_dump(path))
        .collect();
    dumps.sort();

    let mut outcome = BatchOutcome::default();
    for dump_path in dumps {
        match process_category(&dump_path, out_dir, version) {
            Ok(report) => outcome.reports.push(report),
            Err(err) => {
                let category = dump_path
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().to_string())
                    .unwrap_or_default();
                error!(category, %err, "category failed");
                outcome.failures.push(CategoryFailure { category, error: err });
            }
        }
    }
    outcome
}

fn is_category_dump(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(".json") && !name.ends_with(SIDECAR_SUFFIX))
}

/// Load the `<category>_folders.json` sidecar next to the dump, if present.
/// Its `{name}` descriptors supply folder names only.
fn load_sidecar_folders(dump_path: &Path, category: &str) -> Result<Option<Vec<String>>> {
    let sidecar = dump_path.with_file_name(format!("{category}{SIDECAR_SUFFIX}"));
    if !sidecar.is_file() {
        return Ok(None);
    }
    let text = fs::read_to_string(&sidecar)?;
    let descriptors: Vec<Value> = serde_json::from_str(&text)?;
    let names = descriptors
        .iter()
        .filter_map(|descriptor| descriptor.get("name"))
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect();
    Ok(Some(names))
}

fn count_keys(bundle: &Value, field: &str) -> usize {
    bundle
        .get(field)
        .and_then(Value::as_object)
        .map(serde_json::Map::len)
        .unwrap_or(0)
}
