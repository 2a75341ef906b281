//! Logging configuration

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use topology_logger::Level;

use crate::{Category, Error, Result};

/// Settings a [`LoggingManager`](crate::LoggingManager) can be built from.
///
/// Every field is optional in the TOML form:
///
/// ```toml
/// log_dir = "/tmp/topology/run42"
/// context = "run42"
/// default_level = "info"
/// verbosity = 2
///
/// [levels]
/// pexpect = "debug"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Directory for per-logger log files
    pub log_dir: Option<PathBuf>,

    /// Prefix for logger names, usually identifying the run
    pub context: Option<String>,

    /// Level for categories without an entry in `levels`
    pub default_level: Level,

    /// Per-category level overrides
    pub levels: BTreeMap<Category, Level>,

    /// Number of `-v` flags, deciding the console threshold
    pub verbosity: u8,
}

impl LoggingConfig {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParseConfig`] if the document is not valid.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReadConfig`] if the file cannot be read, or
    /// [`Error::ParseConfig`] if it is not valid.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| Error::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Sets the log directory
    #[must_use]
    pub fn with_log_dir(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(log_dir.into());
        self
    }

    /// Sets the run context
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Sets the default level
    #[must_use]
    pub const fn with_default_level(mut self, level: Level) -> Self {
        self.default_level = level;
        self
    }

    /// Overrides the level of one category
    #[must_use]
    pub fn with_category_level(mut self, category: Category, level: Level) -> Self {
        self.levels.insert(category, level);
        self
    }

    /// Sets the `-v` count
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Level a category starts at.
    #[must_use]
    pub fn level_for(&self, category: Category) -> Level {
        self.levels
            .get(&category)
            .copied()
            .unwrap_or(self.default_level)
    }

    /// Threshold for console diagnostics.
    #[must_use]
    pub const fn console_level(&self) -> Level {
        Level::from_verbosity(self.verbosity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use assert_matches::assert_matches;
    use tempfile::tempdir;

    #[test]
    fn test_empty_document_is_default() {
        let config = LoggingConfig::from_toml_str("").unwrap();

        assert_eq!(config, LoggingConfig::default());
        assert_eq!(config.default_level, Level::Info);
        assert_eq!(config.console_level(), Level::Error);
    }

    #[test]
    fn test_full_document() {
        let config = LoggingConfig::from_toml_str(
            r#"
            log_dir = "/tmp/topology/run42"
            context = "run42"
            default_level = "warning"
            verbosity = 3

            [levels]
            pexpect = "DEBUG"
            shell = "error"
            "#,
        )
        .unwrap();

        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/topology/run42")));
        assert_eq!(config.context.as_deref(), Some("run42"));
        assert_eq!(config.level_for(Category::Pexpect), Level::Debug);
        assert_eq!(config.level_for(Category::Shell), Level::Error);
        assert_eq!(config.level_for(Category::Node), Level::Warn);
        assert_eq!(config.console_level(), Level::Debug);
    }

    #[test]
    fn test_unknown_category_rejected() {
        let result = LoggingConfig::from_toml_str(
            r#"
            [levels]
            switch = "debug"
            "#,
        );

        assert_matches!(result, Err(Error::ParseConfig(_)));
    }

    #[test]
    fn test_unknown_level_rejected() {
        let result = LoggingConfig::from_toml_str(r#"default_level = "loud""#);

        assert_matches!(result, Err(Error::ParseConfig(_)));
    }

    #[test]
    fn test_builder() {
        let config = LoggingConfig::default()
            .with_log_dir("/tmp/logs")
            .with_context("run42")
            .with_default_level(Level::Warn)
            .with_category_level(Category::Pexpect, Level::Trace)
            .with_verbosity(1);

        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/logs")));
        assert_eq!(config.level_for(Category::Pexpect), Level::Trace);
        assert_eq!(config.level_for(Category::User), Level::Warn);
        assert_eq!(config.console_level(), Level::Warn);
    }

    #[test]
    fn test_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("logging.toml");
        std::fs::write(&path, "context = \"nightly\"\n").unwrap();

        let config = LoggingConfig::from_file(&path).unwrap();
        assert_eq!(config.context.as_deref(), Some("nightly"));

        assert_matches!(
            LoggingConfig::from_file(dir.path().join("missing.toml")),
            Err(Error::ReadConfig { .. })
        );
    }
}
