use serde::{Deserialize, Serialize};
use std::fmt;

/// Container image reference with registry, repository, tag, and digest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageReference {
    /// Registry hostname (e.g., "ghcr.io"), when the reference names one
    pub registry: Option<String>,
    /// Repository path (e.g., "cloudnative-pg/postgresql")
    pub repository: String,
    /// Tag (e.g., "16.4-202409160000-minimal-bookworm")
    pub tag: Option<String>,
    /// Digest (e.g., "sha256:abc123...")
    pub digest: Option<String>,
}

impl ImageReference {
    /// Parse an image reference string like
    /// "ghcr.io/cloudnative-pg/postgresql:16.4-202409160000@sha256:abc"
    pub fn parse(s: &str) -> Self {
        let (image_part, digest) = match s.split_once('@') {
            Some((before, after)) => (before, Some(after.to_string())),
            None => (s, None),
        };

        // A ':' followed by a '/' belongs to a registry port, not a tag
        let (name, tag) = match image_part.rsplit_once(':') {
            Some((before, after)) if !after.contains('/') => (before, Some(after.to_string())),
            _ => (image_part, None),
        };

        let (registry, repository) = split_registry(name);
        Self {
            registry,
            repository,
            tag,
            digest,
        }
    }

    /// Reference to `repository:tag` pinned to `digest`
    ///
    /// `repository` is taken as a bare name and never searched for a tag, so
    /// it is reproduced verbatim in front of the tag.
    pub fn pinned(repository: &str, tag: impl Into<String>, digest: impl Into<String>) -> Self {
        let (registry, repository) = split_registry(repository);
        Self {
            registry,
            repository,
            tag: Some(tag.into()),
            digest: Some(digest.into()),
        }
    }

    /// Registry and repository without tag or digest
    pub fn name(&self) -> String {
        match &self.registry {
            Some(registry) => format!("{}/{}", registry, self.repository),
            None => self.repository.clone(),
        }
    }

    pub fn is_pinned(&self) -> bool {
        self.digest.is_some()
    }
}

fn split_registry(name: &str) -> (Option<String>, String) {
    match name.split_once('/') {
        Some((first, rest)) if is_registry_host(first) => {
            (Some(first.to_string()), rest.to_string())
        }
        _ => (None, name.to_string()),
    }
}

/// Docker's rule: the first path component is a registry host when it
/// looks like a hostname or is `localhost`
fn is_registry_host(component: &str) -> bool {
    component.contains('.') || component.contains(':') || component == "localhost"
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())?;
        if let Some(tag) = &self.tag {
            write!(f, ":{}", tag)?;
        }
        if let Some(digest) = &self.digest {
            write!(f, "@{}", digest)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_registry_repository_tag() {
        let reference =
            ImageReference::parse("ghcr.io/cloudnative-pg/postgresql:16.4-202409160000");
        assert_eq!(reference.registry.as_deref(), Some("ghcr.io"));
        assert_eq!(reference.repository, "cloudnative-pg/postgresql");
        assert_eq!(reference.tag.as_deref(), Some("16.4-202409160000"));
        assert_eq!(reference.digest, None);
        assert!(!reference.is_pinned());
    }

    #[test]
    fn test_parse_registry_with_port() {
        let reference = ImageReference::parse("localhost:5000/postgresql");
        assert_eq!(reference.registry.as_deref(), Some("localhost:5000"));
        assert_eq!(reference.repository, "postgresql");
        assert_eq!(reference.tag, None);
    }

    #[test]
    fn test_parse_without_registry() {
        let reference = ImageReference::parse("library/postgres:16");
        assert_eq!(reference.registry, None);
        assert_eq!(reference.repository, "library/postgres");
        assert_eq!(reference.to_string(), "library/postgres:16");
    }

    #[test]
    fn test_pinned_display() {
        let reference = ImageReference::pinned(
            "ghcr.io/cloudnative-pg/postgresql",
            "15.3-202302010000-bookworm",
            "sha256:abc",
        );
        assert!(reference.is_pinned());
        assert_eq!(
            reference.to_string(),
            "ghcr.io/cloudnative-pg/postgresql:15.3-202302010000-bookworm@sha256:abc"
        );
    }

    #[test]
    fn test_pinned_keeps_repository_verbatim() {
        let tag = "16.4-202409160000-bookworm";
        for repository in ["localhost:5000", "localhost:5000/postgresql", "postgres"] {
            let reference = ImageReference::pinned(repository, tag, "sha256:abc");
            assert_eq!(
                reference.to_string(),
                format!("{}:{}@sha256:abc", repository, tag)
            );
        }
    }

    #[test]
    fn test_parse_digest_reference_roundtrips() {
        let raw = "ghcr.io/cloudnative-pg/postgresql:17.0-202410010000@sha256:deadbeef";
        let reference = ImageReference::parse(raw);
        assert_eq!(reference.digest.as_deref(), Some("sha256:deadbeef"));
        assert_eq!(reference.to_string(), raw);
    }
}
