//! Job URLs recovered from embedded JSON-LD (`application/ld+json`) blocks.
//!
//! Best effort: blocks that fail to parse are skipped.

use serde_json::Value;

use crate::extract::CandidateSource;
use crate::site::Site;
use crate::types::LinkResult;

/// A secondary candidate source backed by raw JSON-LD block texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonLdSource {
    blocks: Vec<String>,
    marker: &'static str,
}

impl JsonLdSource {
    /// Keep `url` values containing `marker`.
    pub fn new(blocks: Vec<String>, marker: &'static str) -> Self {
        Self { blocks, marker }
    }

    /// Source for `site`, or `None` when the site has no structured-data marker.
    pub fn for_site(site: Site, blocks: Vec<String>) -> Option<Self> {
        site.rules()
            .structured_data_marker
            .map(|marker| Self::new(blocks, marker))
    }

    pub fn marker(&self) -> &'static str {
        self.marker
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Every matching URL across all blocks, in block order.
    pub fn urls(&self) -> Vec<String> {
        let mut urls = Vec::new();
        for (idx, block) in self.blocks.iter().enumerate() {
            match job_urls_from_jsonld(block, self.marker) {
                Ok(found) => urls.extend(found),
                Err(e) => tracing::debug!("ignoring JSON-LD block {idx}: {e}"),
            }
        }
        urls
    }
}

impl CandidateSource for JsonLdSource {
    fn candidates(&self) -> Vec<String> {
        self.urls()
    }
}

/// Parse one JSON-LD block and collect `url` fields containing `marker`.
///
/// Handles a single object, a top-level array of objects, and `@graph`
/// arrays.
pub fn job_urls_from_jsonld(text: &str, marker: &str) -> LinkResult<Vec<String>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    let value: Value = serde_json::from_str(text)?;
    let mut urls = Vec::new();
    collect_urls(&value, marker, &mut urls);
    Ok(urls)
}

fn collect_urls(value: &Value, marker: &str, out: &mut Vec<String>) {
    match value {
        Value::Array(items) => {
            for item in items {
                collect_urls(item, marker, out);
            }
        }
        Value::Object(map) => {
            if let Some(url) = map.get("url").and_then(Value::as_str) {
                if url.contains(marker) {
                    out.push(url.to_string());
                }
            }
            if let Some(graph) = map.get("@graph") {
                collect_urls(graph, marker, out);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LinkError;

    #[test]
    fn test_single_object() {
        let block = r#"{"@type": "JobPosting", "url": "https://www.seek.co.nz/job/123?ref=ld"}"#;
        assert_eq!(
            job_urls_from_jsonld(block, "/job/").unwrap(),
            vec!["https://www.seek.co.nz/job/123?ref=ld"]
        );
    }

    #[test]
    fn test_marker_filters_urls() {
        let block = r#"{"@type": "WebSite", "url": "https://www.seek.co.nz/"}"#;
        assert!(job_urls_from_jsonld(block, "/job/").unwrap().is_empty());
    }

    #[test]
    fn test_graph_and_arrays() {
        let block = r#"
        [
            {"@graph": [
                {"@type": "JobPosting", "url": "https://www.seek.co.nz/job/1"},
                {"@type": "Organization", "url": "https://www.seek.co.nz/companies/acme"}
            ]},
            {"@type": "JobPosting", "url": "https://www.seek.co.nz/job/2"}
        ]
        "#;
        assert_eq!(
            job_urls_from_jsonld(block, "/job/").unwrap(),
            vec!["https://www.seek.co.nz/job/1", "https://www.seek.co.nz/job/2"]
        );
    }

    #[test]
    fn test_non_string_url_ignored() {
        let block = r#"{"url": 42}"#;
        assert!(job_urls_from_jsonld(block, "/job/").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_block_is_error() {
        assert!(matches!(
            job_urls_from_jsonld("{not valid json}", "/job/"),
            Err(LinkError::StructuredData(_))
        ));
    }

    #[test]
    fn test_source_swallows_malformed_blocks() {
        let source = JsonLdSource::new(
            vec![
                "{not valid json}".to_string(),
                String::new(),
                r#"{"url": "https://www.seek.co.nz/job/7"}"#.to_string(),
            ],
            "/job/",
        );
        assert_eq!(source.candidates(), vec!["https://www.seek.co.nz/job/7"]);
        assert_eq!(source.block_count(), 3);
    }

    #[test]
    fn test_for_site() {
        assert!(JsonLdSource::for_site(Site::Seek, Vec::new()).is_some());
        assert!(JsonLdSource::for_site(Site::LinkedIn, Vec::new()).is_none());
    }
}
