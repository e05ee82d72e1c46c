//! Pack manifest metadata
//!
//! A pack ships a `module.json` manifest at its root. Only the fields the
//! pipeline needs are modeled; `id` doubles as the source version in bundle
//! file names.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::{Error, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    /// Stable pack identifier, used as the source version
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl Manifest {
    /// Load the manifest from `<pack_dir>/module.json`.
    pub fn load(pack_dir: &Path) -> Result<Self> {
        let path = pack_dir.join("module.json");
        if !path.is_file() {
            return Err(Error::ManifestMissing(path));
        }
        let text = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_manifest_fields() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(
            dir.path().join("module.json"),
            r#"{"id": "haunted-keep", "title": "The Haunted Keep", "version": "1.2.0"}"#,
        )
        .expect("write");

        let manifest = Manifest::load(dir.path()).expect("load");
        assert_eq!(manifest.id, "haunted-keep");
        assert_eq!(manifest.title.as_deref(), Some("The Haunted Keep"));
        assert_eq!(manifest.version.as_deref(), Some("1.2.0"));
    }

    #[test]
    fn tolerates_extra_fields_and_missing_optionals() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(
            dir.path().join("module.json"),
            r#"{"id": "haunted-keep", "authors": [], "packs": [{"name": "actors"}]}"#,
        )
        .expect("write");

        let manifest = Manifest::load(dir.path()).expect("load");
        assert_eq!(manifest.id, "haunted-keep");
        assert!(manifest.title.is_none());
    }

    #[test]
    fn missing_manifest_is_a_typed_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(matches!(
            Manifest::load(dir.path()),
            Err(Error::ManifestMissing(_))
        ));
    }
}
