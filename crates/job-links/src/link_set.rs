//! Deduplicated, deterministically ordered collections of canonical links.

use std::collections::{BTreeSet, HashSet};

use crate::clean::{clean_job_url, clean_job_url_default};
use crate::site::Site;
use crate::types::{CanonicalLink, CleanOptions, DedupOptions, RawCandidate};
use crate::validate::is_valid_job_url;

/// A set of canonical links, iterated in ascending lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkSet {
    links: BTreeSet<CanonicalLink>,
}

impl LinkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate, canonicalize and insert one raw candidate.
    ///
    /// Returns the link that was inserted, or `None` when the candidate was
    /// rejected or was a duplicate.
    pub fn offer(
        &mut self,
        candidate: &RawCandidate,
        options: &CleanOptions,
    ) -> Option<&CanonicalLink> {
        if !candidate.is_usable() {
            tracing::debug!("skipping candidate without href");
            return None;
        }
        let raw = candidate.href.as_str();
        if !is_valid_job_url(raw, candidate.site) {
            tracing::debug!("skipping invalid or non-job URL: {raw}");
            return None;
        }

        let Some(link) = CanonicalLink::new(clean_job_url(raw, options)) else {
            tracing::debug!("discarding {raw}: no canonical form");
            return None;
        };

        if !self.links.insert(link.clone()) {
            return None;
        }
        tracing::debug!("added job link: {link}");
        self.links.get(&link)
    }

    pub fn contains(&self, link: &str) -> bool {
        self.links.contains(link)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Consume the set into plain strings, sorted ascending.
    pub fn into_sorted_vec(self) -> Vec<String> {
        self.links
            .into_iter()
            .map(CanonicalLink::into_string)
            .collect()
    }
}

/// Build the sorted, deduplicated link list for `site` using its default
/// cleaning options.
pub fn build_link_set<I, S>(candidates: I, site: Site) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    build_link_set_with(candidates, site, &site.clean_options())
}

/// [`build_link_set`] with explicit cleaning options.
pub fn build_link_set_with<I, S>(candidates: I, site: Site, options: &CleanOptions) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut set = LinkSet::new();
    for candidate in candidates {
        set.offer(&RawCandidate::new(candidate.as_ref(), site), options);
    }
    set.into_sorted_vec()
}

/// Deduplicate a list of URLs without site validation.
///
/// With `clean_first` each URL is canonicalized with default options before
/// comparison. Blank entries are dropped. First-seen order is kept unless
/// `sort_result` is set.
pub fn deduplicate_urls<I, S>(urls: I, options: &DedupOptions) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut unique: Vec<String> = urls
        .into_iter()
        .map(|url| {
            if options.clean_first {
                clean_job_url_default(url.as_ref())
            } else {
                url.as_ref().to_string()
            }
        })
        .filter(|url| !url.trim().is_empty())
        .filter(|url| seen.insert(url.clone()))
        .collect();

    if options.sort_result {
        unique.sort();
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_to_end_seek() {
        let candidates = [
            "https://www.seek.co.nz/job/1#x",
            "https://www.seek.co.nz/job/1?ref=y",
            "https://www.seek.co.nz/jobs/search",
            "",
        ];
        assert_eq!(
            build_link_set(candidates, Site::Seek),
            vec!["https://www.seek.co.nz/job/1".to_string()]
        );
    }

    #[test]
    fn test_sorted_and_deterministic() {
        let candidates = vec![
            "https://www.seek.co.nz/job/3".to_string(),
            "https://www.seek.com.au/job/2".to_string(),
            "https://www.seek.co.nz/job/1?tracking=abc".to_string(),
            "https://www.seek.co.nz/job/3#apply".to_string(),
        ];
        let first = build_link_set(&candidates, Site::Seek);
        let second = build_link_set(&candidates, Site::Seek);
        assert_eq!(first, second);
        assert_eq!(
            first,
            vec![
                "https://www.seek.co.nz/job/1",
                "https://www.seek.co.nz/job/3",
                "https://www.seek.com.au/job/2",
            ]
        );
        let mut sorted = first.clone();
        sorted.sort();
        assert_eq!(first, sorted);
    }

    #[test]
    fn test_linkedin_ambiguous_never_emitted() {
        let links = build_link_set(
            [
                "https://www.linkedin.com/jobs/collections/recommended/",
                "https://www.linkedin.com/jobs/view/123456?currentJobId=999999",
                "https://www.linkedin.com/jobs/search/?currentJobId=123456",
                "https://www.linkedin.com/jobs/search/?currentJobId=42",
            ],
            Site::LinkedIn,
        );
        assert_eq!(
            links,
            vec![
                "https://www.linkedin.com/jobs/view/123456",
                "https://www.linkedin.com/jobs/view/42",
            ]
        );
    }

    #[test]
    fn test_bad_candidates_do_not_abort_batch() {
        let links = build_link_set(
            [
                "::::",
                "http://[broken",
                "https://www.seek.co.nz/job/9",
                "\u{0}garbage",
                "https://www.seek.co.nz/job/8",
            ],
            Site::Seek,
        );
        assert_eq!(
            links,
            vec!["https://www.seek.co.nz/job/8", "https://www.seek.co.nz/job/9"]
        );
    }

    #[test]
    fn test_empty_input_is_empty_output() {
        let none: Vec<String> = Vec::new();
        assert!(build_link_set(none, Site::Seek).is_empty());
    }

    #[test]
    fn test_output_satisfies_validator() {
        let links = build_link_set(
            [
                "https://www.seek.co.nz/job/1",
                "https://www.linkedin.com/jobs/view/2",
                "https://www.seek.co.nz/companies/acme",
            ],
            Site::Seek,
        );
        for link in &links {
            assert!(is_valid_job_url(link, Site::Seek));
        }
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn test_offer_reports_duplicates() {
        let mut set = LinkSet::new();
        let opts = CleanOptions::default();
        let first = RawCandidate::new("https://www.seek.co.nz/job/1#a", Site::Seek);
        let second = RawCandidate::new("https://www.seek.co.nz/job/1?b=c", Site::Seek);
        assert!(set.offer(&first, &opts).is_some());
        assert!(set.offer(&second, &opts).is_none());
        assert_eq!(set.len(), 1);
        assert!(set.contains("https://www.seek.co.nz/job/1"));
        assert!(!set.contains("https://www.seek.co.nz/job/1#a"));
    }

    #[test]
    fn test_offer_skips_blank_href() {
        let mut set = LinkSet::new();
        let opts = CleanOptions::default();
        for href in ["", "   ", "\t\n"] {
            assert!(set.offer(&RawCandidate::new(href, Site::Seek), &opts).is_none());
        }
        assert!(set.is_empty());
    }

    #[test]
    fn test_offer_validates_against_candidate_site() {
        let mut set = LinkSet::new();
        let opts = CleanOptions::default();
        let url = "https://www.seek.co.nz/job/7";
        assert!(set.offer(&RawCandidate::new(url, Site::Indeed), &opts).is_none());
        assert!(set.offer(&RawCandidate::new(url, Site::Seek), &opts).is_some());
        assert_eq!(set.into_sorted_vec(), vec![url]);
    }

    #[test]
    fn test_build_with_options_keeps_query() {
        let opts = CleanOptions {
            remove_tracking: false,
            ..CleanOptions::default()
        };
        let links = build_link_set_with(
            ["https://www.seek.co.nz/job/1?type=standout#x"],
            Site::Seek,
            &opts,
        );
        assert_eq!(links, vec!["https://www.seek.co.nz/job/1?type=standout"]);
    }

    #[test]
    fn test_deduplicate_urls_defaults() {
        let urls = [
            "https://www.seek.co.nz/job/2#x",
            "https://www.seek.co.nz/job/1",
            "https://www.seek.co.nz/job/2?ref=y",
            "https://www.linkedin.com/jobs/collections/recommended/",
            "",
        ];
        assert_eq!(
            deduplicate_urls(urls, &DedupOptions::default()),
            vec!["https://www.seek.co.nz/job/1", "https://www.seek.co.nz/job/2"]
        );
    }

    #[test]
    fn test_deduplicate_urls_keeps_order_unsorted() {
        let opts = DedupOptions {
            clean_first: false,
            sort_result: false,
        };
        assert_eq!(
            deduplicate_urls(["b", "a", "b", " "], &opts),
            vec!["b", "a"]
        );
    }
}
