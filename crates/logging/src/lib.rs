//! Per-category logging for topology test runs.
//!
//! A [`LoggingManager`] hands out [`Logger`]s tagged with a [`Category`].
//! Each logger starts at its category's level and, for process-output
//! categories, writes raw output to `<log_dir>/<qualified name>.log` when a
//! log directory is set. Changing a category level later reaches every
//! logger already issued for it.
//!
//! ```no_run
//! use topology_logging::{Category, Level, LoggingManager};
//!
//! let manager = LoggingManager::new();
//! manager.set_logging_context(Some("run42"));
//! manager.set_logging_directory("/tmp/topology/run42")?;
//!
//! let logger = manager.get_logger("sw1", Category::Pexpect)?;
//! logger.write("show vlan");
//!
//! manager.set_category_level(Category::Pexpect, Level::Debug)?;
//! # Ok::<(), topology_logging::Error>(())
//! ```
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

mod category;
mod config;
mod console;
mod error;
mod logger;
mod manager;

pub use category::Category;
pub use config::LoggingConfig;
pub use console::{init_console, init_console_verbosity};
pub use error::{Error, Result};
pub use logger::{LOG_FILE_SUFFIX, Logger, WeakLogger, log_file_path};
pub use manager::{DEFAULT_LEVEL, LoggingManager, qualified_name};

// Re-export backend types callers need
pub use topology_logger::{Channel, Level, MemorySink, Sink};
