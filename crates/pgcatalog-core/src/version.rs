//! Ordering of image tag versions
//!
//! Tags published for the PostgreSQL images look like `15.3-202302010000`
//! or `16beta1-202301010000` once the naming suffix is removed. Both read as
//! PEP 440 versions: the trailing `-N` is an implicit post-release, so the
//! build timestamp breaks ties between rebuilds of one release, and
//! pre-releases rank alpha < beta < rc < final.

use crate::error::{CatalogError, Result};
use pep440_rs::Version;
use std::fmt;
use std::str::FromStr;

/// Parsed version of a tag with the naming suffix removed
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct TagVersion(Version);

impl TagVersion {
    /// Parse a version string
    pub fn parse(s: &str) -> Result<Self> {
        s.parse()
    }
}

impl FromStr for TagVersion {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        Version::from_str(s)
            .map(Self)
            .map_err(|_| CatalogError::invalid_version(s))
    }
}

impl fmt::Display for TagVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
