//! Common test helpers for pgcatalog-core integration tests
//!
//! - An in-memory registry that records every call made against it
//! - Config fixtures pointing at temporary output directories

use async_trait::async_trait;
use camino::Utf8PathBuf;
use pgcatalog_core::{CatalogConfig, CatalogError, ConfigOverrides, RegistryInspector, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const REPOSITORY: &str = "ghcr.io/cloudnative-pg/postgresql";

/// A registry call, as seen by the fake
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListTags(String),
    Digest(String, String),
}

/// Registry fake serving a fixed tag list and per-tag digests
#[derive(Debug, Clone, Default)]
pub struct FakeInspector {
    tags: Vec<String>,
    digests: HashMap<String, String>,
    fail_list: bool,
    calls: Arc<Mutex<Vec<Call>>>,
}

#[allow(dead_code)]
impl FakeInspector {
    /// Every tag gets the digest `sha256:<tag>`
    pub fn with_tags(tags: &[&str]) -> Self {
        Self {
            tags: tags.iter().map(|t| t.to_string()).collect(),
            digests: tags
                .iter()
                .map(|t| (t.to_string(), format!("sha256:{}", t)))
                .collect(),
            ..Default::default()
        }
    }

    pub fn digest_for(mut self, tag: &str, digest: &str) -> Self {
        self.digests.insert(tag.to_string(), digest.to_string());
        self
    }

    pub fn without_digest(mut self, tag: &str) -> Self {
        self.digests.remove(tag);
        self
    }

    pub fn failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::ListTags(_)))
            .count()
    }

    pub fn digest_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Digest(_, tag) => Some(tag),
                Call::ListTags(_) => None,
            })
            .collect()
    }
}

#[async_trait]
impl RegistryInspector for FakeInspector {
    async fn list_tags(&self, repository: &str) -> Result<Vec<String>> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::ListTags(repository.to_string()));
        if self.fail_list {
            return Err(CatalogError::CommandFailed {
                command: format!("skopeo list-tags docker://{}", repository),
                status: "exit status: 1".into(),
                stderr: "unauthorized".into(),
            });
        }
        Ok(self.tags.clone())
    }

    async fn digest(&self, repository: &str, tag: &str) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Digest(repository.to_string(), tag.to_string()));
        self.digests.get(tag).cloned().ok_or_else(|| CatalogError::CommandFailed {
            command: format!("skopeo inspect -n docker://{}:{}", repository, tag),
            status: "exit status: 1".into(),
            stderr: "manifest unknown".into(),
        })
    }
}

/// Default config writing into a fresh temporary directory
#[allow(dead_code)]
pub fn temp_config(suffixes: &[&str]) -> (CatalogConfig, TempDir) {
    let temp = TempDir::new().unwrap();
    let output_dir = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();

    let mut config = CatalogConfig::defaults().unwrap();
    config.apply_overrides(ConfigOverrides {
        suffixes: Some(suffixes.iter().map(|s| s.to_string()).collect()),
        output_dir: Some(output_dir),
        ..Default::default()
    });
    (config, temp)
}
