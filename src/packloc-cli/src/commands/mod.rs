//! Command handlers for the packloc CLI

pub mod bundle;
pub mod configure;
pub mod dump;
pub mod run;

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::config::Config;

/// Resolve the output directory: explicit flag, then configured default,
/// then `<pack-dir>/output`.
pub fn resolve_output(pack_dir: &Path, output: Option<PathBuf>, config: &Config) -> PathBuf {
    output
        .or_else(|| config.output_dir.clone())
        .unwrap_or_else(|| pack_dir.join("output"))
}

/// Locate the store root inside a pack directory.
///
/// Packs keep their stores under `packs/`; pointing the CLI directly at
/// a store root also works.
pub fn store_root(pack_dir: &Path) -> Result<PathBuf> {
    let packs = pack_dir.join("packs");
    if packs.is_dir() {
        return Ok(packs);
    }
    if pack_dir.is_dir() {
        return Ok(pack_dir.to_path_buf());
    }
    bail!("pack directory not found: {}", pack_dir.display());
}
