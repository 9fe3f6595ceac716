//! Configuration resolution: explicit flag, then environment, then default.

use std::path::PathBuf;

use job_links::{FormatOptions, Site};

use crate::error::{CliError, CliResult};

/// Environment variable naming the site to extract for.
pub const SITE_ENV: &str = "JOB_LINKS_SITE";

/// Environment variable holding the URL of the page the candidates came from.
pub const PAGE_URL_ENV: &str = "JOB_LINKS_PAGE_URL";

/// Resolve the site for a run.
pub fn resolve_site(explicit: Option<&str>, page_url: Option<&str>) -> CliResult<Site> {
    let env_site = std::env::var(SITE_ENV).ok();
    let env_page = std::env::var(PAGE_URL_ENV).ok();
    resolve_site_with(
        explicit,
        env_site.as_deref(),
        page_url.or(env_page.as_deref()),
    )
}

/// [`resolve_site`] with the environment passed in.
pub fn resolve_site_with(
    explicit: Option<&str>,
    env_site: Option<&str>,
    page_url: Option<&str>,
) -> CliResult<Site> {
    if let Some(key) = explicit.or(env_site).filter(|k| !k.trim().is_empty()) {
        return Ok(key.parse::<Site>()?);
    }

    match page_url {
        Some(url) => Site::detect(url).ok_or_else(|| CliError::UnsupportedPage(url.to_string())),
        None => Err(CliError::NoSite),
    }
}

/// Build format options from flags. `\n` and `\t` escapes in the separator
/// are expanded so they can be typed on a shell line.
pub fn format_options(separator: &str, include_index: bool, include_count: bool) -> FormatOptions {
    FormatOptions {
        separator: unescape_separator(separator),
        include_index,
        include_count,
    }
}

fn unescape_separator(raw: &str) -> String {
    raw.replace("\\n", "\n").replace("\\t", "\t")
}

/// Where the REPL keeps its history.
pub fn resolve_history_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());

    PathBuf::from(home).join(".job_links_history")
}
