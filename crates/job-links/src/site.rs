//! Supported job boards and the per-site rules that drive validation,
//! canonicalization and identifier recovery.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::types::{CleanOptions, LinkError};

/// A job board the extractor knows how to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Site {
    Seek,
    #[serde(rename = "linkedin")]
    LinkedIn,
    Indeed,
    #[serde(rename = "trademe")]
    TradeMe,
}

/// A regex compiled on first use and shared for the life of the process.
#[derive(Debug)]
pub struct Pattern {
    source: &'static str,
    compiled: OnceLock<Regex>,
}

impl Pattern {
    pub const fn new(source: &'static str) -> Self {
        Self {
            source,
            compiled: OnceLock::new(),
        }
    }

    pub fn source(&self) -> &'static str {
        self.source
    }

    pub fn regex(&self) -> &Regex {
        self.compiled
            .get_or_init(|| Regex::new(self.source).expect("built-in site pattern must compile"))
    }
}

/// Where a site keeps the identifier of a posting.
#[derive(Debug)]
pub enum JobIdSource {
    /// First capture group of a regex over the URL path.
    Path(Pattern),
    /// Value of a query parameter.
    Query(&'static str),
}

/// How a site's URLs are canonicalized.
#[derive(Debug)]
pub enum CanonicalForm {
    /// Strip fragment and query according to [`CleanOptions`].
    Generic,
    /// Rebuild the URL from a numeric job id found in the path or query.
    JobView {
        path_id: Pattern,
        query_key: &'static str,
        prefix: &'static str,
    },
}

/// Static description of one site.
#[derive(Debug)]
pub struct SiteRules {
    pub key: &'static str,
    pub name: &'static str,
    pub domains: &'static [&'static str],
    pub path_markers: &'static [&'static str],
    pub excluded_paths: &'static [&'static str],
    pub page_pattern: Pattern,
    pub job_id: JobIdSource,
    pub canonical: CanonicalForm,
    pub structured_data_marker: Option<&'static str>,
}

static SEEK: SiteRules = SiteRules {
    key: "seek",
    name: "Seek",
    domains: &["seek.co.nz", "seek.com.au"],
    path_markers: &["/job/"],
    excluded_paths: &[],
    page_pattern: Pattern::new(r"^https://(www\.)?seek\.(co\.nz|com\.au)/"),
    job_id: JobIdSource::Path(Pattern::new(r"/job/(\d+)")),
    canonical: CanonicalForm::Generic,
    structured_data_marker: Some("/job/"),
};

static LINKEDIN: SiteRules = SiteRules {
    key: "linkedin",
    name: "LinkedIn",
    domains: &["linkedin.com"],
    path_markers: &["/jobs/"],
    excluded_paths: &[],
    page_pattern: Pattern::new(r"^https://(www\.)?linkedin\.com/"),
    job_id: JobIdSource::Path(Pattern::new(r"/jobs/view/(\d+)")),
    canonical: CanonicalForm::JobView {
        path_id: Pattern::new(r"/jobs/view/(\d+)"),
        query_key: "currentJobId",
        prefix: "https://www.linkedin.com/jobs/view/",
    },
    structured_data_marker: None,
};

static INDEED: SiteRules = SiteRules {
    key: "indeed",
    name: "Indeed",
    domains: &["indeed.com"],
    path_markers: &["/viewjob", "/jobs"],
    excluded_paths: &[],
    page_pattern: Pattern::new(r"^https://(www\.)?indeed\.com/"),
    job_id: JobIdSource::Query("jk"),
    canonical: CanonicalForm::Generic,
    structured_data_marker: None,
};

static TRADEME: SiteRules = SiteRules {
    key: "trademe",
    name: "Trade Me Jobs",
    domains: &["trademe.co.nz"],
    path_markers: &["/jobs/"],
    excluded_paths: &["/browse/"],
    page_pattern: Pattern::new(r"^https://(www\.)?trademe\.co\.nz/a/jobs/"),
    job_id: JobIdSource::Path(Pattern::new(r"/(\d+)$")),
    canonical: CanonicalForm::Generic,
    structured_data_marker: None,
};

impl Site {
    /// All sites, in detection order.
    pub const ALL: [Site; 4] = [Site::Seek, Site::LinkedIn, Site::Indeed, Site::TradeMe];

    pub fn rules(self) -> &'static SiteRules {
        match self {
            Site::Seek => &SEEK,
            Site::LinkedIn => &LINKEDIN,
            Site::Indeed => &INDEED,
            Site::TradeMe => &TRADEME,
        }
    }

    pub fn key(self) -> &'static str {
        self.rules().key
    }

    pub fn display_name(self) -> &'static str {
        self.rules().name
    }

    /// Detect the site a page belongs to from the page's own URL.
    pub fn detect(page_url: &str) -> Option<Site> {
        Site::ALL
            .into_iter()
            .find(|site| site.rules().page_pattern.regex().is_match(page_url))
    }

    /// Default cleaning options used when extracting links for this site.
    pub fn clean_options(self) -> CleanOptions {
        CleanOptions::default()
    }
}

impl SiteRules {
    /// Case-insensitive hostname membership.
    pub fn matches_host(&self, host: &str) -> bool {
        let host = host.to_ascii_lowercase();
        self.domains.iter().any(|d| host.contains(d))
    }

    /// Whether a path looks like a single job-detail page for this site.
    pub fn matches_job_path(&self, path: &str) -> bool {
        let path = path.to_ascii_lowercase();
        self.path_markers.iter().any(|m| path.contains(m))
            && !self.excluded_paths.iter().any(|e| path.contains(e))
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Site {
    type Err = LinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Site::ALL
            .into_iter()
            .find(|site| site.key() == wanted)
            .ok_or_else(|| LinkError::UnknownSite(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keys() {
        assert_eq!("seek".parse::<Site>().unwrap(), Site::Seek);
        assert_eq!("LinkedIn".parse::<Site>().unwrap(), Site::LinkedIn);
        assert_eq!(" trademe ".parse::<Site>().unwrap(), Site::TradeMe);
        assert!(matches!(
            "monster".parse::<Site>(),
            Err(LinkError::UnknownSite(s)) if s == "monster"
        ));
    }

    #[test]
    fn test_display_roundtrips_through_from_str() {
        for site in Site::ALL {
            assert_eq!(site.to_string().parse::<Site>().unwrap(), site);
        }
    }

    #[test]
    fn test_serde_uses_keys() {
        assert_eq!(serde_json::to_string(&Site::LinkedIn).unwrap(), "\"linkedin\"");
        assert_eq!(serde_json::to_string(&Site::TradeMe).unwrap(), "\"trademe\"");
        let site: Site = serde_json::from_str("\"seek\"").unwrap();
        assert_eq!(site, Site::Seek);
    }

    #[test]
    fn test_detect_from_page_url() {
        assert_eq!(
            Site::detect("https://www.seek.co.nz/jobs?keywords=rust"),
            Some(Site::Seek)
        );
        assert_eq!(Site::detect("https://seek.com.au/"), Some(Site::Seek));
        assert_eq!(
            Site::detect("https://www.linkedin.com/jobs/search/"),
            Some(Site::LinkedIn)
        );
        assert_eq!(Site::detect("https://indeed.com/q-rust-jobs.html"), Some(Site::Indeed));
        assert_eq!(
            Site::detect("https://www.trademe.co.nz/a/jobs/it/programming"),
            Some(Site::TradeMe)
        );
        assert_eq!(Site::detect("https://www.trademe.co.nz/a/motors"), None);
        assert_eq!(Site::detect("http://www.seek.co.nz/"), None);
        assert_eq!(Site::detect("not a url"), None);
    }

    #[test]
    fn test_host_match_is_case_insensitive() {
        assert!(Site::Seek.rules().matches_host("WWW.SEEK.CO.NZ"));
        assert!(!Site::Seek.rules().matches_host("www.linkedin.com"));
    }

    #[test]
    fn test_trademe_excludes_browse() {
        let rules = Site::TradeMe.rules();
        assert!(rules.matches_job_path("/a/jobs/it/listing/123"));
        assert!(!rules.matches_job_path("/a/jobs/browse/it"));
    }

    #[test]
    fn test_only_seek_has_structured_data() {
        assert_eq!(Site::Seek.rules().structured_data_marker, Some("/job/"));
        for site in [Site::LinkedIn, Site::Indeed, Site::TradeMe] {
            assert!(site.rules().structured_data_marker.is_none());
        }
    }
}
