//! Catalog generation pipeline
//!
//! Tags are listed once per run. Each configured suffix is then handled in
//! turn: select the newest tag per major, resolve its digest, write the
//! catalog. Nothing runs concurrently.

use crate::catalog::CatalogDocument;
use crate::config::CatalogConfig;
use crate::error::Result;
use crate::registry::RegistryInspector;
use crate::selector::{SelectedTag, TagSelector};
use crate::types::ImageReference;
use camino::Utf8PathBuf;
use std::collections::BTreeMap;
use tracing::debug;

/// Selection for one suffix, before any digest is resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixPlan {
    pub suffix: String,
    /// Newest first
    pub selections: Vec<SelectedTag>,
}

/// A catalog that was written to disk
#[derive(Debug, Clone)]
pub struct GeneratedCatalog {
    pub suffix: String,
    pub path: Utf8PathBuf,
    pub document: CatalogDocument,
}

/// Drives listing, selection, resolution, and writing
pub struct CatalogGenerator<I> {
    config: CatalogConfig,
    inspector: I,
}

impl<I: RegistryInspector> CatalogGenerator<I> {
    /// Create a generator; the configuration is validated up front
    pub fn new(config: CatalogConfig, inspector: I) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, inspector })
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn inspector(&self) -> &I {
        &self.inspector
    }

    /// Every tag of the configured repository
    pub async fn fetch_tags(&self) -> Result<Vec<String>> {
        debug!("Listing tags of {}", self.config.repository);
        self.inspector.list_tags(&self.config.repository).await
    }

    fn selector(&self, suffix: &str) -> Result<TagSelector> {
        TagSelector::new(
            &self.config.version_pattern,
            suffix,
            self.config.min_supported_major,
        )
    }

    /// Selection for one suffix without touching the registry
    pub fn plan_suffix(&self, tags: &[String], suffix: &str) -> Result<SuffixPlan> {
        let selections = self.selector(suffix)?.select(tags);
        Ok(SuffixPlan {
            suffix: suffix.to_string(),
            selections,
        })
    }

    /// Selections for every suffix; lists tags but resolves no digests
    pub async fn plan(&self) -> Result<Vec<SuffixPlan>> {
        let tags = self.fetch_tags().await?;
        self.config
            .suffixes
            .iter()
            .map(|suffix| self.plan_suffix(&tags, suffix))
            .collect()
    }

    /// Select and resolve the catalog for one suffix
    pub async fn build_catalog(&self, tags: &[String], suffix: &str) -> Result<CatalogDocument> {
        let plan = self.plan_suffix(tags, suffix)?;
        debug!(
            "{} major versions selected for suffix {}",
            plan.selections.len(),
            suffix
        );

        let mut images = BTreeMap::new();
        for selected in plan.selections {
            let digest = self
                .inspector
                .digest(&self.config.repository, &selected.tag)
                .await?;
            images.insert(
                selected.major,
                ImageReference::pinned(&self.config.repository, selected.tag, digest),
            );
        }

        Ok(CatalogDocument::new(&self.config.catalog, suffix, images))
    }

    /// Produce and write the catalog of every configured suffix
    pub async fn generate(&self) -> Result<Vec<GeneratedCatalog>> {
        let tags = self.fetch_tags().await?;
        let mut generated = Vec::with_capacity(self.config.suffixes.len());

        for suffix in &self.config.suffixes {
            let document = self.build_catalog(&tags, suffix).await?;
            let path = self.config.output_path(suffix);
            document.write_to(&path)?;
            generated.push(GeneratedCatalog {
                suffix: suffix.clone(),
                path,
                document,
            });
        }

        Ok(generated)
    }
}
