//! URL canonicalization.
//!
//! Generic sites lose their fragment and query string. Sites with a
//! [`CanonicalForm::JobView`] form (LinkedIn) are rebuilt from the job id
//! instead, and URLs on those hosts without a recoverable id are discarded.

use url::Url;

use crate::site::{CanonicalForm, Pattern, Site};
use crate::types::CleanOptions;
use crate::validate::parse_url;

/// Canonicalize a job URL.
///
/// Returns an empty string when the URL should be discarded. Never panics;
/// input that does not parse falls back to plain string trimming.
pub fn clean_job_url(url: &str, options: &CleanOptions) -> String {
    if url.is_empty() {
        return String::new();
    }

    match parse_url(url) {
        Ok(parsed) => clean_parsed(parsed, options),
        Err(e) => {
            tracing::debug!("{e}, falling back to string cleaning");
            clean_url_fallback(url, options)
        }
    }
}

/// [`clean_job_url`] with default options.
pub fn clean_job_url_default(url: &str) -> String {
    clean_job_url(url, &CleanOptions::default())
}

fn clean_parsed(mut parsed: Url, options: &CleanOptions) -> String {
    if let Some((path_id, query_key, prefix)) = parsed.host_str().and_then(job_view_override) {
        return match job_view_id(&parsed, path_id, query_key) {
            Some(id) => format!("{prefix}{id}"),
            None => {
                tracing::debug!("no job id in {parsed}, discarding");
                String::new()
            }
        };
    }

    if options.remove_hash {
        parsed.set_fragment(None);
    }
    if options.remove_tracking {
        parsed.set_query(None);
    }

    parsed.to_string()
}

/// The job-view rebuild rule `(path_id, query_key, prefix)` of the first site
/// whose domains cover `host`, if any.
fn job_view_override(host: &str) -> Option<(&'static Pattern, &'static str, &'static str)> {
    Site::ALL.into_iter().map(Site::rules).find_map(|rules| match &rules.canonical {
        CanonicalForm::JobView {
            path_id,
            query_key,
            prefix,
        } if rules.matches_host(host) => Some((path_id, *query_key, *prefix)),
        _ => None,
    })
}

/// Path id first, then the query parameter. Query ids must be all digits.
fn job_view_id(parsed: &Url, path_id: &Pattern, query_key: &str) -> Option<String> {
    if let Some(id) = path_id
        .regex()
        .captures(parsed.path())
        .and_then(|caps| caps.get(1))
    {
        return Some(id.as_str().to_string());
    }

    parsed
        .query_pairs()
        .find(|(key, _)| key == query_key)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()))
}

/// String-based cleaning for input the URL parser rejects.
fn clean_url_fallback(url: &str, options: &CleanOptions) -> String {
    let mut cleaned = url;

    if options.remove_hash {
        if let Some(idx) = cleaned.find('#') {
            cleaned = &cleaned[..idx];
        }
    }
    if options.remove_tracking {
        if let Some(idx) = cleaned.find('?') {
            cleaned = &cleaned[..idx];
        }
    }

    cleaned.to_string()
}
