use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the strict parsing API and the file helpers.
///
/// Resolution through the `MimeType` constructors and `sniff::guess` never
/// produces these; it falls back to `application/octet-stream` instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Malformed media type {0:?}: expected exactly one '/' between type and subtype")]
    Malformed(String),

    #[error("Unregistered media type: {0}")]
    Unregistered(String),

    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
