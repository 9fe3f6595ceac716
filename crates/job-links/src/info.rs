//! Job identifier recovery from posting URLs.

use crate::site::{JobIdSource, Site};
use crate::types::JobInfo;
use crate::validate::parse_url;

/// Recover what can be learned about a posting from its URL alone.
///
/// `id` is `None` when the URL does not parse or carries no identifier in the
/// place the site keeps it.
pub fn extract_job_info(url: &str, site: Site) -> JobInfo {
    let id = match parse_url(url) {
        Ok(parsed) => match &site.rules().job_id {
            JobIdSource::Path(pattern) => pattern
                .regex()
                .captures(parsed.path())
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string()),
            JobIdSource::Query(key) => parsed
                .query_pairs()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.into_owned())
                .filter(|v| !v.is_empty()),
        },
        Err(e) => {
            tracing::debug!("cannot extract job info: {e}");
            None
        }
    };

    JobInfo {
        url: url.to_string(),
        site,
        id,
    }
}
