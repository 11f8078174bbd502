//! Command implementations

pub mod generate;
pub mod plan;
pub mod version;

use crate::cli::OverrideArgs;
use anyhow::{Context, Result};
use camino::Utf8Path;
use pgcatalog_core::{CatalogConfig, CatalogGenerator, SkopeoInspector};
use tracing::debug;

/// Resolve configuration from defaults, the optional file, and CLI overrides
pub fn load_config(path: Option<&Utf8Path>, overrides: &OverrideArgs) -> Result<CatalogConfig> {
    let mut config = match path {
        Some(path) => CatalogConfig::load(Some(path))
            .with_context(|| format!("Failed to load configuration from {}", path))?,
        None => CatalogConfig::defaults().context("Failed to load built-in configuration")?,
    };
    config.apply_overrides(overrides.to_overrides());
    debug!("Resolved configuration: {:?}", config);
    Ok(config)
}

/// Generator backed by skopeo, as configured
pub fn skopeo_generator(config: CatalogConfig) -> Result<CatalogGenerator<SkopeoInspector>> {
    let inspector = SkopeoInspector::from_settings(&config.skopeo)
        .context("Cannot query the registry without skopeo")?;
    CatalogGenerator::new(config, inspector).context("Invalid catalog configuration")
}
