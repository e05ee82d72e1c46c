//! Configuration command handlers

use std::path::PathBuf;

use anyhow::Result;

use crate::config::Config;

/// Handle the configure command
pub fn handle(output_dir: Option<PathBuf>, show: bool) -> Result<()> {
    let mut config = Config::load()?;

    if show {
        show_config(&config);
        return Ok(());
    }

    if let Some(dir) = output_dir {
        config.output_dir = Some(dir.clone());
        config.save()?;
        println!("Default output directory set: {}", dir.display());
        if let Ok(path) = Config::config_path() {
            println!("Config saved to: {}", path.display());
        }
    } else {
        show_usage();
    }

    Ok(())
}

fn show_config(config: &Config) {
    match &config.output_dir {
        Some(dir) => println!("Output directory: {}", dir.display()),
        None => println!("No output directory configured"),
    }

    if let Ok(path) = Config::config_path() {
        println!("Config file: {}", path.display());
    }
}

fn show_usage() {
    println!("Usage: packloc configure --output-dir DIR");
    println!("   or: packloc configure --show");
}
