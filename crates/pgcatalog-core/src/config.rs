//! Catalog generation configuration
//!
//! Loaded with the following precedence (low to high):
//! 1. Embedded defaults (built into binary)
//! 2. Config file passed on the command line (partial YAML)
//! 3. Explicit overrides (CLI flags and `PGCATALOG_*` variables, handled by caller)

use crate::error::{CatalogError, Result};
use crate::types::ImageReference;
use camino::{Utf8Path, Utf8PathBuf};
use regex::Regex;
use rust_embed::RustEmbed;
use serde::{Deserialize, Serialize};
use serde_yaml_ng::Value;
use std::collections::HashSet;
use std::fs;

/// Embedded configuration files
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/defaults/"]
#[prefix = ""]
struct EmbeddedDefaults;

const DEFAULTS_FILE: &str = "catalog.yaml";

/// Everything the generator needs to produce the catalogs of one repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// Image repository, e.g. "ghcr.io/cloudnative-pg/postgresql"
    pub repository: String,
    /// Version pattern; group 1 captures the major version
    pub version_pattern: String,
    /// Majors below this are never cataloged
    pub min_supported_major: u64,
    /// One catalog is produced per suffix
    pub suffixes: Vec<String>,
    /// Directory receiving the catalog files
    pub output_dir: Utf8PathBuf,
    pub catalog: CatalogSettings,
    pub skopeo: SkopeoSettings,
}

/// Fixed envelope and naming of the emitted documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogSettings {
    pub api_version: String,
    pub kind: String,
    /// `metadata.name` is `<name_prefix><suffix>`
    pub name_prefix: String,
    /// Files are named `<file_prefix><suffix>.yaml`
    pub file_prefix: String,
}

impl CatalogSettings {
    pub fn catalog_name(&self, suffix: &str) -> String {
        format!("{}{}", self.name_prefix, suffix)
    }

    pub fn file_name(&self, suffix: &str) -> String {
        format!("{}{}.yaml", self.file_prefix, suffix)
    }
}

/// How skopeo is executed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkopeoRunner {
    /// `<engine> run --rm <image> ...`
    Container,
    /// A `skopeo` binary found in PATH
    Native,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SkopeoSettings {
    pub runner: SkopeoRunner,
    /// Container engine used by the container runner
    pub engine: String,
    /// Skopeo image used by the container runner
    pub image: String,
    /// Binary used by the native runner
    pub binary: String,
}

/// Highest-precedence settings, usually from the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub repository: Option<String>,
    pub version_pattern: Option<String>,
    pub min_supported_major: Option<u64>,
    pub suffixes: Option<Vec<String>>,
    pub output_dir: Option<Utf8PathBuf>,
    pub runner: Option<SkopeoRunner>,
}

impl CatalogConfig {
    /// Embedded defaults only
    pub fn defaults() -> Result<Self> {
        let config: Self = serde_yaml_ng::from_value(Self::embedded_defaults()?)?;
        Ok(config)
    }

    /// Embedded defaults, overlaid with `path` when given
    pub fn load(path: Option<&Utf8Path>) -> Result<Self> {
        let mut value = Self::embedded_defaults()?;

        if let Some(path) = path {
            let content = fs::read_to_string(path)?;
            let overlay: Value = serde_yaml_ng::from_str(&content).map_err(|e| {
                CatalogError::invalid_config(format!("Failed to parse {}: {}", path, e))
            })?;
            merge_yaml(&mut value, overlay);
        }

        let config: Self = serde_yaml_ng::from_value(value)
            .map_err(|e| CatalogError::invalid_config(e.to_string()))?;
        Ok(config)
    }

    /// Parse a full or partial YAML document on top of the defaults
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let mut value = Self::embedded_defaults()?;
        merge_yaml(&mut value, serde_yaml_ng::from_str(content)?);
        serde_yaml_ng::from_value(value).map_err(|e| CatalogError::invalid_config(e.to_string()))
    }

    fn embedded_defaults() -> Result<Value> {
        let embedded_file = EmbeddedDefaults::get(DEFAULTS_FILE).ok_or_else(|| {
            CatalogError::invalid_config(format!("Embedded config not found: {}", DEFAULTS_FILE))
        })?;

        let content = std::str::from_utf8(&embedded_file.data).map_err(|_| {
            CatalogError::invalid_config(format!(
                "Invalid UTF-8 in embedded config: {}",
                DEFAULTS_FILE
            ))
        })?;

        Ok(serde_yaml_ng::from_str(content)?)
    }

    /// Apply overrides in place
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(repository) = overrides.repository {
            self.repository = repository;
        }
        if let Some(pattern) = overrides.version_pattern {
            self.version_pattern = pattern;
        }
        if let Some(min) = overrides.min_supported_major {
            self.min_supported_major = min;
        }
        if let Some(suffixes) = overrides.suffixes {
            self.suffixes = suffixes;
        }
        if let Some(dir) = overrides.output_dir {
            self.output_dir = dir;
        }
        if let Some(runner) = overrides.runner {
            self.skopeo.runner = runner;
        }
    }

    /// Reject configurations that cannot produce a catalog
    pub fn validate(&self) -> Result<()> {
        if self.repository.trim().is_empty() {
            return Err(CatalogError::invalid_config("repository must not be empty"));
        }

        let reference = ImageReference::parse(&self.repository);
        if reference.tag.is_some() || reference.is_pinned() {
            return Err(CatalogError::invalid_config(format!(
                "repository must not carry a tag or digest: {}",
                self.repository
            )));
        }

        if self.suffixes.is_empty() {
            return Err(CatalogError::invalid_config(
                "at least one suffix is required",
            ));
        }

        let mut seen = HashSet::new();
        for suffix in &self.suffixes {
            if !seen.insert(suffix.as_str()) {
                return Err(CatalogError::invalid_config(format!(
                    "duplicate suffix: {}",
                    suffix
                )));
            }
        }

        let pattern = Regex::new(&self.version_pattern)
            .map_err(|e| CatalogError::invalid_pattern(&self.version_pattern, e.to_string()))?;
        if pattern.captures_len() < 2 {
            return Err(CatalogError::invalid_pattern(
                &self.version_pattern,
                "no capture group for the major version",
            ));
        }

        Ok(())
    }

    /// Path of the catalog written for `suffix`
    pub fn output_path(&self, suffix: &str) -> Utf8PathBuf {
        self.output_dir.join(self.catalog.file_name(suffix))
    }
}

/// Recursively overlay mappings; any other overlay value replaces the base
fn merge_yaml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_yaml(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        // An empty document leaves the defaults untouched
        (_, Value::Null) => {}
        (base, overlay) => *base = overlay,
    }
}
