//! Image catalog generation for pgcatalog
//!
//! This crate provides functionality for:
//! - Listing the tags of a container repository and resolving tag digests
//!   through skopeo
//! - Selecting the newest tag of each supported major version
//! - Writing `ClusterImageCatalog` documents pinned by digest
//!
//! # Example
//!
//! ```no_run
//! use pgcatalog_core::{CatalogConfig, CatalogGenerator, SkopeoInspector};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = CatalogConfig::defaults()?;
//!     let inspector = SkopeoInspector::from_settings(&config.skopeo)?;
//!
//!     let generator = CatalogGenerator::new(config, inspector)?;
//!     for catalog in generator.generate().await? {
//!         println!("{}: {}", catalog.suffix, catalog.path);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod generator;
pub mod registry;
pub mod selector;
pub mod types;
pub mod version;

// Re-export main types for convenience
pub use catalog::{CatalogDocument, CatalogImage, CatalogMetadata, CatalogSpec};
pub use config::{CatalogConfig, CatalogSettings, ConfigOverrides, SkopeoRunner, SkopeoSettings};
pub use error::{CatalogError, Result};
pub use generator::{CatalogGenerator, GeneratedCatalog, SuffixPlan};
pub use registry::{RegistryInspector, SkopeoInspector};
pub use selector::{SelectedTag, TagSelector};
pub use types::ImageReference;
pub use version::TagVersion;

/// Version of the pgcatalog-core crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
