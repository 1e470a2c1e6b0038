use anyhow::{anyhow, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser, Debug, Clone)]
#[command(name = "content-loader")]
#[command(about = "Content registration loader")]
#[command(long_about = "Loads a mod manifest, registers the bundled vault content and the
manifest's items into in-memory registries and reports the result.

Registration runs once, on a single thread, the way a host runs its
content-loading phase before gameplay starts.")]
pub struct Config {
    /// Path to the mod manifest (TOML)
    #[arg(long, env = "CONTENT_MANIFEST", default_value = "content-loader/mods/vault.toml")]
    pub manifest: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "CONTENT_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Fail on malformed identifiers instead of logging them
    #[arg(long, env = "CONTENT_STRICT_IDS")]
    pub strict_ids: bool,

    /// Skip the bundled vault content
    #[arg(long)]
    pub no_vault: bool,

    /// Print the registered content as TOML
    #[arg(long)]
    pub dump: bool,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.manifest.as_os_str().is_empty() {
            return Err(anyhow!("manifest path cannot be empty"));
        }

        self.level()?;

        Ok(())
    }

    /// Tracing level named by `log_level`
    pub fn level(&self) -> Result<Level> {
        self.log_level
            .parse::<Level>()
            .map_err(|_| anyhow!("invalid log level '{}'", self.log_level))
    }
}
