//! Job Links — validation, canonicalization and deduplication of job-board URLs.

pub mod clean;
pub mod extract;
pub mod format;
pub mod info;
pub mod link_set;
pub mod site;
pub mod structured;
pub mod types;
pub mod validate;

pub use clean::{clean_job_url, clean_job_url_default};
pub use extract::{extract, CandidateSource, Extractor};
pub use format::format_urls;
pub use info::extract_job_info;
pub use link_set::{build_link_set, build_link_set_with, deduplicate_urls, LinkSet};
pub use site::{Site, SiteRules};
pub use structured::{job_urls_from_jsonld, JsonLdSource};
pub use types::*;
pub use validate::is_valid_job_url;
