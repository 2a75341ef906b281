//! Logging manager
//!
//! The manager owns the run-wide settings (log directory, run context and
//! per-category levels) and keeps track of the loggers it hands out so that
//! category level changes reach them.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use topology_logger::Level;
use tracing::debug;

use crate::{Category, Error, Logger, LoggingConfig, Result, WeakLogger};

/// Level every category starts at.
pub const DEFAULT_LEVEL: Level = Level::Info;

/// Qualified logger name: `<context>.<category>.<name>`, or
/// `<category>.<name>` without a context.
#[must_use]
pub fn qualified_name(context: Option<&str>, category: Category, name: &str) -> String {
    match context {
        Some(context) => format!("{context}.{category}.{name}"),
        None => format!("{category}.{name}"),
    }
}

/// Creates and configures loggers per category.
///
/// Clones share state. Loggers are tracked weakly: the manager never keeps a
/// logger alive, it only updates the ones still in use.
#[derive(Debug, Clone)]
pub struct LoggingManager {
    state: Arc<RwLock<State>>,
}

#[derive(Debug)]
struct State {
    log_dir: Option<PathBuf>,
    context: Option<String>,
    levels: HashMap<Category, Level>,
    loggers: HashMap<Category, Vec<WeakLogger>>,
}

impl State {
    fn live_loggers(&mut self, category: Category) -> Vec<Logger> {
        let Some(issued) = self.loggers.get_mut(&category) else {
            return Vec::new();
        };

        let mut live = Vec::with_capacity(issued.len());
        issued.retain(|weak| match weak.upgrade() {
            Some(logger) => {
                live.push(logger);
                true
            }
            None => false,
        });
        live
    }
}

impl LoggingManager {
    /// Creates a manager with no log directory, no context and every
    /// category at [`DEFAULT_LEVEL`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(State {
                log_dir: None,
                context: None,
                levels: Category::ALL
                    .into_iter()
                    .map(|category| (category, DEFAULT_LEVEL))
                    .collect(),
                loggers: HashMap::new(),
            })),
        }
    }

    /// Creates a manager from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured log directory cannot be created.
    pub fn from_config(config: &LoggingConfig) -> Result<Self> {
        let manager = Self::new();

        if let Some(log_dir) = &config.log_dir {
            manager.set_logging_directory(log_dir)?;
        }
        manager.set_logging_context(config.context.as_deref());

        {
            let mut state = manager.state.write();
            for category in Category::ALL {
                state.levels.insert(category, config.level_for(category));
            }
        }

        Ok(manager)
    }

    /// Current log directory
    #[must_use]
    pub fn logging_directory(&self) -> Option<PathBuf> {
        self.state.read().log_dir.clone()
    }

    /// Creates `log_dir` (with any missing parents) and makes it the
    /// directory for loggers created from now on.
    ///
    /// Loggers that already exist keep their directory; see
    /// [`LoggingManager::propagate_logging_directory`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::CreateDirectory`] if the directory cannot be created.
    pub fn set_logging_directory(&self, log_dir: impl AsRef<Path>) -> Result<()> {
        let log_dir = log_dir.as_ref();
        std::fs::create_dir_all(log_dir).map_err(|source| Error::CreateDirectory {
            path: log_dir.to_path_buf(),
            source,
        })?;

        debug!(path = %log_dir.display(), "logging directory set");
        self.state.write().log_dir = Some(log_dir.to_path_buf());
        Ok(())
    }

    /// Moves every live logger to the current log directory.
    ///
    /// # Errors
    ///
    /// Stops at the first logger whose log file cannot be opened.
    pub fn propagate_logging_directory(&self) -> Result<()> {
        let (log_dir, loggers) = {
            let mut state = self.state.write();
            let loggers: Vec<Logger> = Category::ALL
                .into_iter()
                .flat_map(|category| state.live_loggers(category))
                .collect();
            (state.log_dir.clone(), loggers)
        };

        for logger in &loggers {
            logger.set_log_directory(log_dir.as_deref())?;
        }
        Ok(())
    }

    /// Current run context
    #[must_use]
    pub fn logging_context(&self) -> Option<String> {
        self.state.read().context.clone()
    }

    /// Sets the prefix for names of loggers created from now on; `None` or an
    /// empty string removes it.
    pub fn set_logging_context(&self, context: Option<&str>) {
        self.state.write().context = context
            .filter(|context| !context.is_empty())
            .map(ToString::to_string);
    }

    /// Level loggers of `category` are created with.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCategory`] if `category` is not a category name.
    pub fn category_level(&self, category: impl AsRef<str>) -> Result<Level> {
        let category: Category = category.as_ref().parse()?;
        Ok(self
            .state
            .read()
            .levels
            .get(&category)
            .copied()
            .unwrap_or(DEFAULT_LEVEL))
    }

    /// Sets the level of a category and of every logger already issued for
    /// it, in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCategory`] if `category` is not a category name.
    pub fn set_category_level(&self, category: impl AsRef<str>, level: Level) -> Result<()> {
        let category: Category = category.as_ref().parse()?;

        let loggers = {
            let mut state = self.state.write();
            state.levels.insert(category, level);
            state.live_loggers(category)
        };

        debug!(%category, %level, loggers = loggers.len(), "category level set");
        for logger in &loggers {
            logger.set_level(level);
        }
        Ok(())
    }

    /// Creates a logger called `name` in `category`, configured with the
    /// category level and the current log directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownLoggerCategory`] if `category` is not a
    /// category name, [`Error::NotImplemented`] if the category has no logger
    /// implementation, or an error if the log file cannot be opened.
    pub fn get_logger(&self, name: &str, category: impl AsRef<str>) -> Result<Logger> {
        let category_name = category.as_ref();
        let category =
            Category::lookup(category_name).ok_or_else(|| Error::UnknownLoggerCategory {
                category: category_name.to_string(),
                logger: name.to_string(),
            })?;

        let (qualified, level, log_dir) = {
            let state = self.state.read();
            (
                qualified_name(state.context.as_deref(), category, name),
                state.levels.get(&category).copied().unwrap_or(DEFAULT_LEVEL),
                state.log_dir.clone(),
            )
        };

        let logger = match category {
            Category::Pexpect => {
                Logger::with_file_output(qualified, category, level, log_dir.as_deref())?
            }
            Category::Library
            | Category::Platform
            | Category::User
            | Category::Node
            | Category::Shell
            | Category::Connection
            | Category::Service => return Err(Error::NotImplemented(category)),
        };

        self.state
            .write()
            .loggers
            .entry(category)
            .or_default()
            .push(logger.downgrade());

        debug!(logger = logger.name(), %category, %level, "logger created");
        Ok(logger)
    }

    /// Live loggers issued for `category`, in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCategory`] if `category` is not a category name.
    pub fn loggers(&self, category: impl AsRef<str>) -> Result<Vec<Logger>> {
        let category: Category = category.as_ref().parse()?;
        Ok(self.state.write().live_loggers(category))
    }
}

impl Default for LoggingManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use assert_matches::assert_matches;
    use tempfile::tempdir;
    use tracing_test::traced_test;

    #[test]
    fn test_qualified_name() {
        assert_eq!(
            qualified_name(Some("run42"), Category::Pexpect, "sw1"),
            "run42.pexpect.sw1"
        );
        assert_eq!(qualified_name(None, Category::Pexpect, "sw1"), "pexpect.sw1");
    }

    #[test]
    fn test_defaults() {
        let manager = LoggingManager::new();

        assert!(manager.logging_directory().is_none());
        assert!(manager.logging_context().is_none());
        for category in Category::ALL {
            assert_eq!(manager.category_level(category).unwrap(), Level::Info);
        }
    }

    #[test]
    fn test_empty_context_is_unset() {
        let manager = LoggingManager::new();

        manager.set_logging_context(Some("run42"));
        assert_eq!(manager.logging_context().as_deref(), Some("run42"));

        manager.set_logging_context(Some(""));
        assert!(manager.logging_context().is_none());
    }

    #[test]
    fn test_dropped_loggers_are_forgotten() {
        let manager = LoggingManager::new();
        let kept = manager.get_logger("sw1", Category::Pexpect).unwrap();
        drop(manager.get_logger("sw2", Category::Pexpect).unwrap());

        let live = manager.loggers(Category::Pexpect).unwrap();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].name(), kept.name());
    }

    #[test]
    fn test_from_config() {
        let dir = tempdir().unwrap();
        let log_dir = dir.path().join("run42");
        let config = LoggingConfig::default()
            .with_log_dir(&log_dir)
            .with_context("run42")
            .with_default_level(Level::Warn)
            .with_category_level(Category::Pexpect, Level::Debug);

        let manager = LoggingManager::from_config(&config).unwrap();

        assert!(log_dir.is_dir());
        assert_eq!(manager.logging_directory(), Some(log_dir.clone()));
        assert_eq!(manager.logging_context().as_deref(), Some("run42"));
        assert_eq!(manager.category_level("node").unwrap(), Level::Warn);

        let logger = manager.get_logger("sw1", "pexpect").unwrap();
        assert_eq!(logger.level(), Level::Debug);
        assert_eq!(logger.log_path(), Some(log_dir.join("run42.pexpect.sw1.log")));
    }

    #[test]
    fn test_create_directory_failure() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("not-a-dir");
        std::fs::write(&file, "").unwrap();

        let manager = LoggingManager::new();
        assert_matches!(
            manager.set_logging_directory(file.join("logs")),
            Err(Error::CreateDirectory { .. })
        );
        assert!(manager.logging_directory().is_none());
    }

    #[test]
    #[traced_test]
    fn test_changes_are_traced() {
        let manager = LoggingManager::new();
        let _logger = manager.get_logger("sw1", Category::Pexpect).unwrap();
        manager
            .set_category_level(Category::Pexpect, Level::Debug)
            .unwrap();

        assert!(logs_contain("logger created"));
        assert!(logs_contain("category level set"));
    }
}
