//! Bundle construction command handler

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use packloc::BatchOutcome;
use packloc_store::Manifest;

/// Handle the `bundle` command: turn category dumps into translation
/// bundles.
pub fn handle(
    dump_dir: &Path,
    output: Option<PathBuf>,
    version: Option<String>,
    pack_dir: Option<PathBuf>,
) -> Result<()> {
    let version = resolve_version(version, pack_dir.as_deref())?;
    let out_dir = output.unwrap_or_else(|| {
        dump_dir
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| dump_dir.to_path_buf())
    });

    let outcome = packloc::process_dir(dump_dir, &out_dir, &version);
    print_summary(&outcome);

    if outcome.reports.is_empty() && !outcome.failures.is_empty() {
        bail!("no category could be bundled");
    }
    Ok(())
}

/// The source version comes from the flag, falling back to the pack
/// manifest's id.
pub fn resolve_version(version: Option<String>, pack_dir: Option<&Path>) -> Result<String> {
    if let Some(version) = version {
        return Ok(version);
    }
    let pack_dir =
        pack_dir.context("provide --version, or --pack-dir to read it from module.json")?;
    let manifest = Manifest::load(pack_dir)
        .with_context(|| format!("failed to read pack manifest in {}", pack_dir.display()))?;
    Ok(manifest.id)
}

pub fn print_summary(outcome: &BatchOutcome) {
    println!(
        "{:<28} {:>8} {:>8} {:>8}",
        "Category", "Entries", "Folders", "Skipped"
    );
    println!("{}", "-".repeat(56));
    for report in &outcome.reports {
        println!(
            "{:<28} {:>8} {:>8} {:>8}",
            report.category, report.entries, report.folders, report.skipped
        );
    }
    for failure in &outcome.failures {
        println!("{:<28}   FAILED: {}", failure.category, failure.error);
    }
    println!("{}", "-".repeat(56));
    println!(
        "{} bundles written, {} categories failed",
        outcome.reports.len(),
        outcome.failures.len()
    );
}
