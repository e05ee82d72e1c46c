//! Store dump command handler

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::commands::{resolve_output, store_root};
use crate::config::Config;

/// Handle the `dump` command: every category store becomes a
/// `<category>.json` array dump.
pub fn handle(pack_dir: &Path, output: Option<PathBuf>) -> Result<()> {
    let config = Config::load()?;
    let out_dir = resolve_output(pack_dir, output, &config);
    let store_root = store_root(pack_dir)?;

    let outcome = packloc_store::dump_all(&store_root, &out_dir)?;

    println!("{:<28} {:>8}", "Category", "Records");
    println!("{}", "-".repeat(38));
    for report in &outcome.reports {
        println!("{:<28} {:>8}", report.category, report.records);
    }
    for failure in &outcome.failures {
        println!("{:<28}   FAILED: {}", failure.category, failure.error);
    }
    println!("{}", "-".repeat(38));
    println!(
        "{} categories dumped to {}",
        outcome.reports.len(),
        out_dir.display()
    );

    if outcome.reports.is_empty() {
        bail!("no category store could be dumped");
    }
    Ok(())
}
