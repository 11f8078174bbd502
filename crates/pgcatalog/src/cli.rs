//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use pgcatalog_core::{ConfigOverrides, SkopeoRunner};

/// pgcatalog - pinned PostgreSQL image catalogs from a container registry
#[derive(Parser, Debug)]
#[command(name = "pgcatalog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a YAML file overriding the built-in configuration
    #[arg(short, long, global = true, env = "PGCATALOG_CONFIG")]
    pub config: Option<Utf8PathBuf>,

    #[command(flatten)]
    pub overrides: OverrideArgs,

    /// Defaults to `generate`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Default)]
pub enum Commands {
    /// Write one catalog per suffix (default)
    #[default]
    Generate,

    /// Show the tag selected per major without resolving digests
    Plan(PlanArgs),

    /// Show version information
    Version(VersionArgs),
}

/// Settings that take precedence over the config file
#[derive(Args, Debug, Default)]
pub struct OverrideArgs {
    /// Image repository to catalog
    #[arg(long, global = true, env = "PGCATALOG_REPOSITORY")]
    pub repository: Option<String>,

    /// Version pattern; capture group 1 is the major version
    #[arg(long, global = true, env = "PGCATALOG_VERSION_PATTERN")]
    pub version_pattern: Option<String>,

    /// Lowest major version to include
    #[arg(long, global = true, env = "PGCATALOG_MIN_MAJOR")]
    pub min_major: Option<u64>,

    /// Suffix to catalog (repeatable; replaces the configured list)
    #[arg(
        long = "suffix",
        global = true,
        allow_hyphen_values = true,
        value_delimiter = ',',
        env = "PGCATALOG_SUFFIXES"
    )]
    pub suffixes: Vec<String>,

    /// Directory receiving the catalog files
    #[arg(short, long, global = true, env = "PGCATALOG_OUTPUT_DIR")]
    pub output_dir: Option<Utf8PathBuf>,

    /// Run a skopeo binary from PATH instead of the skopeo container
    #[arg(long, global = true, env = "PGCATALOG_NATIVE_SKOPEO")]
    pub native_skopeo: bool,
}

impl OverrideArgs {
    pub fn to_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            repository: self.repository.clone(),
            version_pattern: self.version_pattern.clone(),
            min_supported_major: self.min_major,
            suffixes: (!self.suffixes.is_empty()).then(|| self.suffixes.clone()),
            output_dir: self.output_dir.clone(),
            runner: self.native_skopeo.then_some(SkopeoRunner::Native),
        }
    }
}

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
