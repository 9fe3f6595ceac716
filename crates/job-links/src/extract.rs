//! Extraction runs: candidate sources in, sorted canonical links out.

use crate::link_set::LinkSet;
use crate::site::Site;
use crate::structured::JsonLdSource;
use crate::types::{CleanOptions, Extraction, RawCandidate};

/// Supplies raw candidate URLs for one extraction run.
///
/// Collection itself (page scraping, reading a file) lives with the caller.
pub trait CandidateSource {
    fn candidates(&self) -> Vec<String>;
}

impl<F> CandidateSource for F
where
    F: Fn() -> Vec<String>,
{
    fn candidates(&self) -> Vec<String> {
        self()
    }
}

/// Drives candidates through validation, canonicalization and the link set
/// for a single site.
#[derive(Debug, Clone)]
pub struct Extractor {
    site: Site,
    options: CleanOptions,
    structured: Option<JsonLdSource>,
}

impl Extractor {
    pub fn new(site: Site) -> Self {
        Self {
            site,
            options: site.clean_options(),
            structured: None,
        }
    }

    pub fn with_options(mut self, options: CleanOptions) -> Self {
        self.options = options;
        self
    }

    /// Attach JSON-LD blocks as a secondary source. Ignored for sites that do
    /// not publish job URLs in structured data.
    pub fn with_structured_data(mut self, blocks: Vec<String>) -> Self {
        match JsonLdSource::for_site(self.site, blocks) {
            Some(source) => self.structured = Some(source),
            None => tracing::debug!(
                "{} has no structured-data marker, ignoring JSON-LD blocks",
                self.site.display_name()
            ),
        }
        self
    }

    pub fn site(&self) -> Site {
        self.site
    }

    pub fn options(&self) -> &CleanOptions {
        &self.options
    }

    /// Run one extraction and report what was seen and kept.
    pub fn run(&self, source: &dyn CandidateSource) -> Extraction {
        let mut candidates = source.candidates();
        tracing::info!(
            "{}: found {} potential job links",
            self.site.display_name(),
            candidates.len()
        );

        if let Some(structured) = &self.structured {
            let extra = structured.candidates();
            tracing::debug!(
                "{} job links from {} JSON-LD blocks",
                extra.len(),
                structured.block_count()
            );
            candidates.extend(extra);
        }

        let mut set = LinkSet::new();
        for href in &candidates {
            set.offer(&RawCandidate::new(href.as_str(), self.site), &self.options);
        }

        tracing::info!(
            "{}: extraction complete, {} unique job links",
            self.site.display_name(),
            set.len()
        );

        Extraction {
            site: self.site,
            candidates_seen: candidates.len(),
            links: set.into_sorted_vec(),
        }
    }

    /// Run one extraction and return only the links.
    pub fn extract(&self, source: &dyn CandidateSource) -> Vec<String> {
        self.run(source).links
    }
}

/// Extract sorted canonical links for `site` from a single source.
pub fn extract(site: Site, source: &dyn CandidateSource) -> Vec<String> {
    Extractor::new(site).extract(source)
}
