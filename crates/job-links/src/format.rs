//! Plain-text rendering of link lists for copying.

use crate::types::FormatOptions;

/// Render links as text.
///
/// An empty list renders as an empty string, never as a bare count header.
pub fn format_urls<S: AsRef<str>>(urls: &[S], options: &FormatOptions) -> String {
    if urls.is_empty() {
        return String::new();
    }

    let lines: Vec<String> = urls
        .iter()
        .enumerate()
        .map(|(idx, url)| {
            if options.include_index {
                format!("{}. {}", idx + 1, url.as_ref())
            } else {
                url.as_ref().to_string()
            }
        })
        .collect();

    let body = lines.join(&options.separator);
    if options.include_count {
        format!("Total: {} links\n{body}", urls.len())
    } else {
        body
    }
}
