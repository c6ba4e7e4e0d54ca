//! CLI command implementations.

pub mod build;
pub mod plan;

pub use build::build_site;
pub use plan::show_plan;

use anyhow::{Context, Result};
use outsite_core::SiteConfig;
use std::path::{Path, PathBuf};

/// Load the config file (or defaults) and apply command-line path overrides.
///
/// Overrides are relative to the working directory, not the config file.
pub fn load_config(
    config_path: &Path,
    export: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<SiteConfig> {
    tracing::debug!("Loading config from {:?}", config_path);
    let mut config =
        SiteConfig::load_or_default(config_path).context("Failed to load configuration")?;

    let cwd = std::env::current_dir().context("Failed to read working directory")?;
    if let Some(export) = export {
        config.paths.export = cwd.join(export);
    }
    if let Some(output) = output {
        config.paths.output = cwd.join(output);
    }

    Ok(config)
}
