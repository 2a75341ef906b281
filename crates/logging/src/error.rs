use std::path::PathBuf;

use thiserror::Error;

use crate::Category;

/// Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// The name does not match any category.
    #[error("unknown category \"{0}\"")]
    UnknownCategory(String),

    /// A logger was requested under a name that does not match any category.
    #[error("unknown category \"{category}\" for logger {logger}")]
    UnknownLoggerCategory {
        /// The category name given.
        category: String,
        /// The logger name given.
        logger: String,
    },

    /// The category is valid but has no logger implementation.
    #[error("category \"{0}\" not implemented")]
    NotImplemented(Category),

    /// The log directory could not be created.
    #[error("failed to create log directory {path}: {source}")]
    CreateDirectory {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Error from the logging backend.
    #[error(transparent)]
    Backend(#[from] topology_logger::Error),

    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    ReadConfig {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration could not be parsed.
    #[error("invalid logging config: {0}")]
    ParseConfig(#[from] toml::de::Error),

    /// A global tracing subscriber is already installed.
    #[error(transparent)]
    Subscriber(#[from] tracing::subscriber::SetGlobalDefaultError),
}
