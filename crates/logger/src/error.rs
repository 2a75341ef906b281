use std::path::PathBuf;

use thiserror::Error;

/// Result type for backend operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// A file sink could not open its output file.
    #[error("failed to open log file {path}: {source}")]
    OpenFile {
        /// The file that could not be opened.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A level name did not match any known severity.
    #[error("unknown log level \"{0}\"")]
    UnknownLevel(String),
}
