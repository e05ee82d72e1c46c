//! Bundle serialization

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use crate::Result;

/// Bundle file name: `<sourceVersion>.<category>.json`.
pub fn bundle_file_name(version: &str, category: &str) -> String {
    format!("{version}.{category}.json")
}

/// Serialize a JSON value with 4-space indentation, non-ASCII preserved
/// literally.
pub fn to_pretty_vec<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(buf)
}

/// Write the cleaned bundle to `<out_dir>/<version>.<category>.json`,
/// creating the directory if absent and overwriting unconditionally.
pub fn write_bundle(
    out_dir: &Path,
    version: &str,
    category: &str,
    bundle: &Value,
) -> Result<PathBuf> {
    fs::create_dir_all(out_dir)?;
    let path = out_dir.join(bundle_file_name(version, category));
    fs::write(&path, to_pretty_vec(bundle)?)?;
    Ok(path)
}
