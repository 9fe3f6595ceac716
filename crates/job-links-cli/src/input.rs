//! Candidate and JSON-LD input loading.

use std::io::Read;
use std::path::Path;

use crate::error::{CliError, CliResult};

/// Split candidate text into URLs: one per line, blank lines and `#`
/// comments skipped.
pub fn parse_candidate_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Read candidates from a file, or from stdin when `path` is `-`.
pub fn read_candidates(path: &str) -> CliResult<Vec<String>> {
    let text = if path == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        read_file(Path::new(path))?
    };

    let candidates = parse_candidate_lines(&text);
    tracing::debug!("read {} candidates from {path}", candidates.len());
    Ok(candidates)
}

/// Read each file as one JSON-LD block.
pub fn read_jsonld_blocks<P: AsRef<Path>>(paths: &[P]) -> CliResult<Vec<String>> {
    paths.iter().map(|p| read_file(p.as_ref())).collect()
}

fn read_file(path: &Path) -> CliResult<String> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}
