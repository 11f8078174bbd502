//! Generate command

use super::skopeo_generator;
use crate::output::Reporter;
use anyhow::{Context, Result};
use pgcatalog_core::CatalogConfig;

/// Write the catalog of every configured suffix
pub async fn run(config: CatalogConfig, out: Reporter) -> Result<()> {
    let generator = skopeo_generator(config)?;
    let config = generator.config();

    let spinner = out.spinner(&format!(
        "Generating {} catalogs for {}",
        config.suffixes.len(),
        config.repository
    ));
    let result = generator.generate().await;
    spinner.finish_and_clear();
    let generated = result.context("Catalog generation failed")?;

    out.header("Catalogs");
    for catalog in &generated {
        let document = &catalog.document;
        if document.spec.images.is_empty() {
            out.warning(&format!(
                "{}: no tags matched, wrote empty catalog to {}",
                document.metadata.name, catalog.path
            ));
            continue;
        }

        out.success(&format!("{} -> {}", document.metadata.name, catalog.path));
        for image in &document.spec.images {
            out.entry(image.major, &image.image);
        }
    }

    Ok(())
}
