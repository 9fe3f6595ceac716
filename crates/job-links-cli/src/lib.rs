//! Job Links CLI — feeds candidate URLs into the extractor and renders results.

pub mod config;
pub mod error;
pub mod input;
pub mod repl;

pub use config::{resolve_history_path, resolve_site, resolve_site_with};
pub use error::{CliError, CliResult};
pub use input::{parse_candidate_lines, read_candidates, read_jsonld_blocks};
