//! Error types for the command-line host.

use std::path::PathBuf;

/// All errors the CLI reports to the user.
#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("No site given. Pass --site, set JOB_LINKS_SITE, or pass --page-url")]
    NoSite,

    #[error("Page is not on a supported job board: {0}")]
    UnsupportedPage(String),

    #[error(transparent)]
    Link(#[from] job_links::LinkError),

    #[error("Cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CliResult<T> = Result<T, CliError>;
