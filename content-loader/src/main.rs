//! Content loader binary
//!
//! Main entry point for running a mod manifest's registration phase.

use anyhow::Result;
use clap::Parser;
use content_loader::{load, Config, LoadOptions, Manifest};
use tracing::{error, info, Level};

fn main() -> Result<()> {
    // Parse configuration
    let config = Config::parse();

    // Validate configuration
    config.validate()?;

    let manifest = Manifest::load(&config.manifest)?;

    // Debug output from the module needs a subscriber that lets it through
    let mut level = config.level()?;
    if manifest.context.debug_info {
        level = level.max(Level::DEBUG);
    }
    tracing_subscriber::fmt().with_max_level(level).init();

    info!("Loading manifest {}", config.manifest.display());

    match load(&manifest, LoadOptions::from(&config), None) {
        Ok(report) => {
            for (group, entries) in &report.groups {
                info!("{}: {} entries", group.display_name(), entries.len());
            }
            if config.dump {
                println!("{}", report.to_toml()?);
            }
            Ok(())
        }
        Err(e) => {
            error!("Content loading failed: {:#}", e);
            Err(e)
        }
    }
}
