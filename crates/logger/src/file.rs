//! File-backed sink

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use parking_lot::{Mutex, RwLock};

use crate::{Error, Formatter, Level, MessageFormatter, Record, Result, Sink};

/// Appends one line per record to a file.
///
/// Writes go straight to the file without a userspace buffer, so detaching or
/// dropping the sink never loses records.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    level: RwLock<Level>,
    formatter: Box<dyn Formatter>,
    file: Mutex<File>,
}

impl FileSink {
    /// Opens (creating if needed) `path` for appending, with the raw
    /// [`MessageFormatter`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::OpenFile`] if the file cannot be opened.
    pub fn open(path: impl Into<PathBuf>, level: Level) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| Error::OpenFile {
                path: path.clone(),
                source,
            })?;

        Ok(Self {
            path,
            level: RwLock::new(level),
            formatter: Box::new(MessageFormatter),
            file: Mutex::new(file),
        })
    }

    /// Replace the formatter.
    #[must_use]
    pub fn with_formatter(mut self, formatter: impl Formatter) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Path of the file this sink appends to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn emit(&self, record: &Record<'_>) -> io::Result<()> {
        let mut line = String::with_capacity(record.message.len() + 1);
        self.formatter.format(record, &mut line);
        line.push('\n');

        self.file.lock().write_all(line.as_bytes())
    }

    fn flush(&self) -> io::Result<()> {
        self.file.lock().flush()
    }

    fn level(&self) -> Level {
        *self.level.read()
    }

    fn set_level(&self, level: Level) {
        *self.level.write() = level;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlainTextFormatter;

    use assert_matches::assert_matches;
    use tempfile::tempdir;

    #[test]
    fn test_one_line_per_record() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sw1.log");
        let sink = FileSink::open(&path, Level::Info).unwrap();

        sink.emit(&Record::new(Level::Info, "pexpect.sw1", "hello"))
            .unwrap();
        sink.emit(&Record::new(Level::Info, "pexpect.sw1", "world"))
            .unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\nworld\n");
        assert_eq!(sink.path(), path.as_path());
    }

    #[test]
    fn test_appends_to_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sw1.log");
        std::fs::write(&path, "earlier\n").unwrap();

        let sink = FileSink::open(&path, Level::Info).unwrap();
        sink.emit(&Record::new(Level::Info, "pexpect.sw1", "later"))
            .unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "earlier\nlater\n");
    }

    #[test]
    fn test_threshold() {
        let dir = tempdir().unwrap();
        let sink = FileSink::open(dir.path().join("a.log"), Level::Info).unwrap();

        assert!(sink.is_enabled(Level::Warn));
        assert!(!sink.is_enabled(Level::Debug));

        sink.set_level(Level::Debug);
        assert!(sink.is_enabled(Level::Debug));
    }

    #[test]
    fn test_custom_formatter() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.log");
        let sink = FileSink::open(&path, Level::Info)
            .unwrap()
            .with_formatter(PlainTextFormatter::new());

        sink.emit(&Record::new(Level::Error, "a", "boom")).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.ends_with(":::ERROR:::boom\n"));
    }

    #[test]
    fn test_open_missing_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("a.log");

        assert_matches!(
            FileSink::open(&path, Level::Info),
            Err(Error::OpenFile { path: failed, .. }) if failed == path
        );
    }
}
