//! Version command

use crate::cli::VersionArgs;
use anyhow::Result;
use serde::Serialize;
use std::fmt;

/// Build metadata of this binary
#[derive(Debug, Clone, Serialize)]
pub struct VersionInfo {
    pub version: &'static str,
    /// pgcatalog-core library version
    pub core_version: &'static str,
    /// Short git SHA, when built from a checkout
    pub commit: Option<&'static str>,
    pub build_date: Option<&'static str>,
    pub target: Option<&'static str>,
}

impl VersionInfo {
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            core_version: pgcatalog_core::VERSION,
            commit: option_env!("GIT_SHA"),
            build_date: option_env!("BUILD_DATE"),
            target: option_env!("TARGET"),
        }
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pgcatalog {}", self.version)?;
        if let Some(commit) = self.commit {
            write!(f, " ({})", commit)?;
        }
        if let Some(target) = self.target {
            write!(f, " {}", target)?;
        }
        Ok(())
    }
}

pub fn run(args: VersionArgs) -> Result<()> {
    let info = VersionInfo::current();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("{}", info);
        if let Some(date) = info.build_date {
            println!("Built: {}", date);
        }
    }

    Ok(())
}
