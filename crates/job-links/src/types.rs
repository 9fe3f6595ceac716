//! Core data types for job link extraction.

use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::site::Site;

/// An unvalidated URL gathered from page content, tagged with its site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCandidate {
    pub href: String,
    pub site: Site,
}

impl RawCandidate {
    pub fn new(href: impl Into<String>, site: Site) -> Self {
        Self {
            href: href.into(),
            site,
        }
    }

    /// Whether the candidate carries anything worth validating.
    pub fn is_usable(&self) -> bool {
        !self.href.trim().is_empty()
    }
}

/// A normalized job URL. Never empty or whitespace-only.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CanonicalLink(String);

impl CanonicalLink {
    /// Wrap an already-canonicalized string, rejecting blank values.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CanonicalLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalLink {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for CanonicalLink {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Options controlling the generic canonicalization rules.
///
/// `preserve_query_params` is accepted for compatibility but the generic
/// path clears the whole query string whenever `remove_tracking` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanOptions {
    pub remove_tracking: bool,
    pub remove_hash: bool,
    pub preserve_query_params: BTreeSet<String>,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            remove_tracking: true,
            remove_hash: true,
            preserve_query_params: BTreeSet::new(),
        }
    }
}

/// Options for [`crate::deduplicate_urls`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupOptions {
    pub clean_first: bool,
    pub sort_result: bool,
}

impl Default for DedupOptions {
    fn default() -> Self {
        Self {
            clean_first: true,
            sort_result: true,
        }
    }
}

/// Options for [`crate::format_urls`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    pub separator: String,
    pub include_index: bool,
    pub include_count: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            separator: "\n".to_string(),
            include_index: false,
            include_count: false,
        }
    }
}

/// Identifying details recovered from a job URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobInfo {
    pub url: String,
    pub site: Site,
    pub id: Option<String>,
}

/// Result of one extraction run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    pub site: Site,
    pub candidates_seen: usize,
    pub links: Vec<String>,
}

impl Extraction {
    pub fn count(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// Errors that can occur in the job links library.
#[derive(thiserror::Error, Debug)]
pub enum LinkError {
    #[error("Unknown site: {0}")]
    UnknownSite(String),

    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Structured data error: {0}")]
    StructuredData(#[from] serde_json::Error),
}

/// Convenience result type.
pub type LinkResult<T> = Result<T, LinkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_link_rejects_blank() {
        assert!(CanonicalLink::new("").is_none());
        assert!(CanonicalLink::new("   \t").is_none());
        let link = CanonicalLink::new("https://www.seek.co.nz/job/1").unwrap();
        assert_eq!(link.as_str(), "https://www.seek.co.nz/job/1");
        assert_eq!(link.to_string(), "https://www.seek.co.nz/job/1");
    }

    #[test]
    fn test_canonical_link_orders_lexicographically() {
        let a = CanonicalLink::new("https://a.example/job/2").unwrap();
        let b = CanonicalLink::new("https://b.example/job/1").unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_clean_options_defaults() {
        let opts = CleanOptions::default();
        assert!(opts.remove_tracking);
        assert!(opts.remove_hash);
        assert!(opts.preserve_query_params.is_empty());
    }

    #[test]
    fn test_clean_options_partial_json() {
        let opts: CleanOptions = serde_json::from_str(r#"{"remove_hash": false}"#).unwrap();
        assert!(opts.remove_tracking);
        assert!(!opts.remove_hash);
    }

    #[test]
    fn test_raw_candidate_usable() {
        assert!(!RawCandidate::new("", Site::Seek).is_usable());
        assert!(!RawCandidate::new("  ", Site::Seek).is_usable());
        assert!(RawCandidate::new("https://www.seek.co.nz/job/1", Site::Seek).is_usable());
    }
}
