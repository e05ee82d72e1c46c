//! CLI argument definitions for packloc

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "packloc")]
#[command(about = "Content pack translation bundle extractor", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Dump every category store in a pack to <category>.json
    #[command(visible_alias = "d")]
    Dump {
        /// Pack directory (contains packs/ with one store per category)
        pack_dir: PathBuf,

        /// Output directory (defaults to the configured output dir, then
        /// <pack-dir>/output)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build translation bundles from dumped category files
    #[command(visible_alias = "b")]
    Bundle {
        /// Directory holding <category>.json dumps
        dump_dir: PathBuf,

        /// Output directory for bundles (defaults next to the dumps)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Source version used in bundle file names
        #[arg(short = 'V', long)]
        version: Option<String>,

        /// Pack directory whose module.json supplies the version when
        /// --version is not given
        #[arg(long)]
        pack_dir: Option<PathBuf>,
    },

    /// Dump stores and build bundles in one pass
    #[command(visible_alias = "r")]
    Run {
        /// Pack directory (module.json + packs/)
        pack_dir: PathBuf,

        /// Output directory (defaults to the configured output dir, then
        /// <pack-dir>/output)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Source version (defaults to the module.json id)
        #[arg(short = 'V', long)]
        version: Option<String>,
    },

    /// Configure default settings
    #[command(visible_alias = "c")]
    Configure {
        /// Set the default output directory
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}
