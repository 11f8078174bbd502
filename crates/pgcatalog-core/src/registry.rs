use crate::config::{SkopeoRunner, SkopeoSettings};
use crate::error::{CatalogError, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::{debug, trace};

/// Read access to a container registry
#[async_trait]
pub trait RegistryInspector: Send + Sync {
    /// List every tag published for `repository`
    async fn list_tags(&self, repository: &str) -> Result<Vec<String>>;

    /// Content digest of `repository:tag`
    async fn digest(&self, repository: &str, tag: &str) -> Result<String>;
}

/// `skopeo list-tags` output
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TagList {
    tags: Vec<String>,
}

/// `skopeo inspect` output, reduced to the field we read
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InspectOutput {
    digest: String,
}

/// Registry inspector that shells out to skopeo
#[derive(Debug, Clone)]
pub struct SkopeoInspector {
    program: PathBuf,
    /// Arguments placed before the skopeo subcommand
    prefix_args: Vec<String>,
}

impl SkopeoInspector {
    /// Build an inspector from an explicit program and leading arguments
    pub fn new(program: impl Into<PathBuf>, prefix_args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            prefix_args,
        }
    }

    /// Locate the container engine or skopeo binary named by `settings`
    ///
    /// # Errors
    /// Returns an error if the required tool is not found in PATH
    pub fn from_settings(settings: &SkopeoSettings) -> Result<Self> {
        match settings.runner {
            SkopeoRunner::Container => {
                let engine = which::which(&settings.engine)
                    .map_err(|_| CatalogError::tool_not_found(&settings.engine))?;
                debug!("Found {} at: {:?}", settings.engine, engine);
                Ok(Self::new(
                    engine,
                    vec!["run".into(), "--rm".into(), settings.image.clone()],
                ))
            }
            SkopeoRunner::Native => {
                let binary = which::which(&settings.binary)
                    .map_err(|_| CatalogError::tool_not_found(&settings.binary))?;
                debug!("Found {} at: {:?}", settings.binary, binary);
                Ok(Self::new(binary, Vec::new()))
            }
        }
    }

    /// Full argument vector for a skopeo invocation
    pub fn command_args(&self, args: &[String]) -> Vec<String> {
        self.prefix_args.iter().chain(args).cloned().collect()
    }

    fn list_tags_args(repository: &str) -> Vec<String> {
        vec!["list-tags".into(), format!("docker://{}", repository)]
    }

    fn inspect_args(repository: &str, tag: &str) -> Vec<String> {
        vec![
            "inspect".into(),
            "-n".into(),
            format!("docker://{}:{}", repository, tag),
        ]
    }

    async fn run_json<T: DeserializeOwned>(&self, args: &[String]) -> Result<T> {
        let args = self.command_args(args);
        let command_line = format!("{} {}", self.program.display(), args.join(" "));
        debug!("Running: {}", command_line);

        let output = Command::new(&self.program).args(&args).output().await?;

        if !output.status.success() {
            return Err(CatalogError::command_failed(
                command_line,
                output.status,
                &output.stderr,
            ));
        }

        trace!("{} returned {} bytes", command_line, output.stdout.len());
        Ok(serde_json::from_slice(&output.stdout)?)
    }
}

#[async_trait]
impl RegistryInspector for SkopeoInspector {
    async fn list_tags(&self, repository: &str) -> Result<Vec<String>> {
        let list: TagList = self.run_json(&Self::list_tags_args(repository)).await?;
        debug!("Found {} tags for {}", list.tags.len(), repository);
        Ok(list.tags)
    }

    async fn digest(&self, repository: &str, tag: &str) -> Result<String> {
        let inspect: InspectOutput = self.run_json(&Self::inspect_args(repository, tag)).await?;
        debug!("{}:{} resolved to {}", repository, tag, inspect.digest);
        Ok(inspect.digest)
    }
}
