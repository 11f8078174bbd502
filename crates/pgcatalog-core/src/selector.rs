//! Pick the newest tag of every supported major version

use crate::error::{CatalogError, Result};
use crate::version::TagVersion;
use regex::Regex;
use std::collections::HashSet;
use tracing::{debug, trace};

/// Tag chosen to represent one major version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedTag {
    pub major: u64,
    pub tag: String,
}

/// Filters tags carrying one naming suffix and selects a winner per major
#[derive(Debug, Clone)]
pub struct TagSelector {
    matcher: Regex,
    suffix: String,
    min_supported_major: u64,
}

impl TagSelector {
    /// Build a selector matching `^<version_pattern><suffix>$`
    ///
    /// Capture group 1 of `version_pattern` is the major version. The suffix
    /// is matched literally.
    pub fn new(version_pattern: &str, suffix: &str, min_supported_major: u64) -> Result<Self> {
        let anchored = format!("^(?:{}){}$", version_pattern, regex::escape(suffix));
        let matcher = Regex::new(&anchored)
            .map_err(|e| CatalogError::invalid_pattern(version_pattern, e.to_string()))?;

        if matcher.captures_len() < 2 {
            return Err(CatalogError::invalid_pattern(
                version_pattern,
                "no capture group for the major version",
            ));
        }

        Ok(Self {
            matcher,
            suffix: suffix.to_string(),
            min_supported_major,
        })
    }

    /// True when `tag` has this selector's suffix and matches the pattern
    pub fn matches(&self, tag: &str) -> bool {
        self.matcher.is_match(tag)
    }

    /// Major version captured from a matching tag
    ///
    /// `None` when the capture is not a decimal number or exceeds `u64::MAX`.
    pub fn major_of(&self, tag: &str) -> Option<u64> {
        self.matcher
            .captures(tag)?
            .get(1)
            .and_then(|m| m.as_str().parse().ok())
    }

    /// Matching tags sorted newest first
    pub fn sorted_matches<'a>(&self, tags: &'a [String]) -> Vec<&'a str> {
        let mut versioned: Vec<(TagVersion, &str)> = tags
            .iter()
            .filter(|tag| self.matches(tag))
            .filter_map(|tag| {
                let bare = tag.strip_suffix(&self.suffix).unwrap_or(tag);
                match TagVersion::parse(bare) {
                    Ok(version) => Some((version, tag.as_str())),
                    Err(_) => {
                        trace!("Skipping tag with unparseable version: {}", tag);
                        None
                    }
                }
            })
            .collect();

        // Stable sort keeps registry order among equal versions
        versioned.sort_by(|(a, _), (b, _)| b.cmp(a));
        versioned.into_iter().map(|(_, tag)| tag).collect()
    }

    /// The highest tag of each major at or above the floor, newest first
    pub fn select(&self, tags: &[String]) -> Vec<SelectedTag> {
        let mut seen = HashSet::new();
        let mut selected = Vec::new();

        for tag in self.sorted_matches(tags) {
            let Some(major) = self.major_of(tag) else {
                debug!("Skipping {}: major version is not a u64", tag);
                continue;
            };

            if major < self.min_supported_major {
                trace!("Skipping {}: major {} is below the floor", tag, major);
                continue;
            }

            if seen.insert(major) {
                debug!("Selected {} for major {}", tag, major);
                selected.push(SelectedTag {
                    major,
                    tag: tag.to_string(),
                });
            }
        }

        selected
    }
}
