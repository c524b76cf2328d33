use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a conversion run.
///
/// Problems inside the `.bib` source itself are never reported here: records which
/// cannot be rendered are skipped instead.
#[derive(Debug, Error)]
pub enum Error {
    /// An input file (bibliography or template) could not be read.
    #[error("cannot read '{}': {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    /// An output file could not be written.
    #[error("cannot write '{}': {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    /// The Markdown output location is missing or not a directory.
    #[error("output directory '{}' does not exist or is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// None of the usable entries carries an integer `year` field,
    /// so no year range can be computed.
    #[error("no entry with an integer year found; cannot compute the year range")]
    NoYears,
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
