//! Error types for pgcatalog-core

use thiserror::Error;

/// Result type alias using pgcatalog-core's Error type
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors raised while listing, selecting, resolving, or writing catalogs
#[derive(Error, Debug)]
pub enum CatalogError {
    /// External tool exited unsuccessfully
    #[error("Command `{command}` failed ({status}): {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    /// External tool could not be located
    #[error("{tool} not found in PATH")]
    ToolNotFound { tool: String },

    /// IO error (spawning a process, writing a catalog)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// YAML parsing or serialization error
    #[error("YAML error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// Version pattern does not compile or lacks a major capture group
    #[error("Invalid version pattern `{pattern}`: {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Tag version could not be parsed
    #[error("Invalid version format: {version}")]
    InvalidVersion { version: String },
}

impl CatalogError {
    /// Create a command failure from a finished process
    pub fn command_failed(
        command: impl Into<String>,
        status: std::process::ExitStatus,
        stderr: &[u8],
    ) -> Self {
        Self::CommandFailed {
            command: command.into(),
            status: status.to_string(),
            stderr: String::from_utf8_lossy(stderr).trim().to_string(),
        }
    }

    /// Create a tool-not-found error
    pub fn tool_not_found(tool: impl Into<String>) -> Self {
        Self::ToolNotFound { tool: tool.into() }
    }

    /// Create an invalid pattern error
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an invalid version error
    pub fn invalid_version(version: impl Into<String>) -> Self {
        Self::InvalidVersion {
            version: version.into(),
        }
    }
}
