//! Full pipeline command handler

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::commands::bundle::{print_summary, resolve_version};
use crate::commands::{resolve_output, store_root};
use crate::config::Config;

/// Handle the `run` command: dump every category store, then build the
/// bundles, under one output root.
///
/// Dumps land in `<out>/dump` so earlier bundle output is never mistaken
/// for a category dump on re-runs.
pub fn handle(pack_dir: &Path, output: Option<PathBuf>, version: Option<String>) -> Result<()> {
    let config = Config::load()?;
    let out_dir = resolve_output(pack_dir, output, &config);
    let version = resolve_version(version, Some(pack_dir))?;
    let store_root = store_root(pack_dir)?;

    println!("Pack version: {version}");

    let dump_dir = out_dir.join("dump");
    let dump_outcome = packloc_store::dump_all(&store_root, &dump_dir)?;
    println!(
        "Dumped {} categories ({} failed)",
        dump_outcome.reports.len(),
        dump_outcome.failures.len()
    );
    for failure in &dump_outcome.failures {
        println!("  {}: {}", failure.category, failure.error);
    }
    if dump_outcome.reports.is_empty() {
        bail!("no category store could be dumped");
    }

    let outcome = packloc::process_dir(&dump_dir, &out_dir, &version);
    print_summary(&outcome);

    if outcome.reports.is_empty() {
        bail!("no category could be bundled");
    }
    Ok(())
}
