//! Image catalog document and writer

use crate::config::CatalogSettings;
use crate::error::Result;
use crate::types::ImageReference;
use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use tracing::debug;

/// Catalog mapping major versions to pinned images
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDocument {
    pub api_version: String,
    pub kind: String,
    pub metadata: CatalogMetadata,
    pub spec: CatalogSpec,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogMetadata {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSpec {
    pub images: Vec<CatalogImage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogImage {
    pub major: u64,
    pub image: String,
}

impl CatalogDocument {
    /// Build the catalog for `suffix`; entries come out ascending by major
    pub fn new(
        settings: &CatalogSettings,
        suffix: &str,
        images: BTreeMap<u64, ImageReference>,
    ) -> Self {
        let images = images
            .into_iter()
            .map(|(major, image)| CatalogImage {
                major,
                image: image.to_string(),
            })
            .collect();

        Self {
            api_version: settings.api_version.clone(),
            kind: settings.kind.clone(),
            metadata: CatalogMetadata {
                name: settings.catalog_name(suffix),
            },
            spec: CatalogSpec { images },
        }
    }

    pub fn majors(&self) -> Vec<u64> {
        self.spec.images.iter().map(|i| i.major).collect()
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Write the document to `path`, replacing any existing file
    pub fn write_to(&self, path: &Utf8Path) -> Result<()> {
        let yaml = self.to_yaml()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, yaml)?;
        debug!(
            "Wrote {} ({} images) to {}",
            self.metadata.name,
            self.spec.images.len(),
            path
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn settings() -> CatalogSettings {
        CatalogSettings {
            api_version: "postgresql.cnpg.io/v1".into(),
            kind: "ClusterImageCatalog".into(),
            name_prefix: "postgresql".into(),
            file_prefix: "catalog".into(),
        }
    }

    fn pinned(tag: &str, digest: &str) -> ImageReference {
        ImageReference::pinned("ghcr.io/cloudnative-pg/postgresql", tag, digest)
    }

    #[test]
    fn test_entries_sorted_ascending() {
        let mut images = BTreeMap::new();
        images.insert(16, pinned("16.4-202409160000-bookworm", "sha256:16"));
        images.insert(14, pinned("14.13-202409160000-bookworm", "sha256:14"));
        images.insert(15, pinned("15.8-202409160000-bookworm", "sha256:15"));

        let doc = CatalogDocument::new(&settings(), "-bookworm", images);
        assert_eq!(doc.majors(), vec![14, 15, 16]);
        assert_eq!(doc.metadata.name, "postgresql-bookworm");
        assert_eq!(
            doc.spec.images[0].image,
            "ghcr.io/cloudnative-pg/postgresql:14.13-202409160000-bookworm@sha256:14"
        );
    }

    #[test]
    fn test_yaml_key_order() {
        let mut images = BTreeMap::new();
        images.insert(16, pinned("16.4-202409160000-bookworm", "sha256:16"));
        let yaml = CatalogDocument::new(&settings(), "-bookworm", images)
            .to_yaml()
            .unwrap();

        let api = yaml.find("apiVersion: postgresql.cnpg.io/v1").unwrap();
        let kind = yaml.find("kind: ClusterImageCatalog").unwrap();
        let metadata = yaml.find("metadata:").unwrap();
        let spec = yaml.find("spec:").unwrap();
        assert!(api < kind && kind < metadata && metadata < spec);

        let major = yaml.find("major: 16").unwrap();
        let image = yaml.find("image: ghcr.io/").unwrap();
        assert!(major < image);
    }

    #[test]
    fn test_empty_catalog_serializes_empty_list() {
        let doc = CatalogDocument::new(&settings(), "-bookworm", BTreeMap::new());
        let yaml = doc.to_yaml().unwrap();
        assert!(yaml.contains("images: []"));
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let temp = TempDir::new().unwrap();
        let dir = Utf8Path::from_path(temp.path()).unwrap();
        let path = dir.join(settings().file_name("-bookworm"));
        std::fs::write(&path, "stale content that is longer").unwrap();

        let mut images = BTreeMap::new();
        images.insert(16, pinned("16.4-202409160000-bookworm", "sha256:16"));
        let doc = CatalogDocument::new(&settings(), "-bookworm", images);
        doc.write_to(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let parsed: CatalogDocument = serde_yaml_ng::from_str(&written).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn test_write_creates_missing_directory() {
        let temp = TempDir::new().unwrap();
        let dir = Utf8Path::from_path(temp.path()).unwrap().join("nested/out");
        let doc = CatalogDocument::new(&settings(), "-trixie", BTreeMap::new());
        let path = dir.join(settings().file_name("-trixie"));
        doc.write_to(&path).unwrap();
        assert!(path.exists());
    }
}
