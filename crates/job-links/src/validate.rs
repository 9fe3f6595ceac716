//! Job-detail URL validation.

use url::Url;

use crate::site::Site;
use crate::types::{LinkError, LinkResult};

/// Parse an absolute URL, keeping the offending input in the error.
pub(crate) fn parse_url(url: &str) -> LinkResult<Url> {
    Url::parse(url).map_err(|source| LinkError::InvalidUrl {
        url: url.to_string(),
        source,
    })
}

/// Whether `url` points at a single job posting on `site`.
///
/// The host must belong to one of the site's domains and the path must look
/// like a job-detail page rather than a search or browse listing. Unparsable
/// input is simply not a job URL.
pub fn is_valid_job_url(url: &str, site: Site) -> bool {
    if url.is_empty() {
        return false;
    }

    let parsed = match parse_url(url) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::trace!("{e}");
            return false;
        }
    };

    let rules = site.rules();
    let host_ok = parsed.host_str().is_some_and(|h| rules.matches_host(h));
    host_ok && rules.matches_job_path(parsed.path())
}
