//! Logger handles
//!
//! A [`Logger`] always has the base capability: a name, a category, a level
//! and a log directory, backed by a channel. Loggers for process-output
//! categories additionally own a file output, which turns the log directory
//! into an attached [`FileSink`] writing `<dir>/<name>.log`.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use topology_logger::{Channel, FileSink, Level, Sink, SinkId};
use tracing::debug;

use crate::{Category, Result};

/// Suffix appended to a logger name to form its log file name.
pub const LOG_FILE_SUFFIX: &str = ".log";

/// Path of the log file a file-backed logger called `name` writes in `dir`.
#[must_use]
pub fn log_file_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}{LOG_FILE_SUFFIX}"))
}

/// A named logger. Clones are handles to the same logger.
#[derive(Debug, Clone)]
pub struct Logger {
    inner: Arc<Inner>,
}

/// Non-owning handle to a [`Logger`].
#[derive(Debug, Clone)]
pub struct WeakLogger {
    inner: Weak<Inner>,
}

#[derive(Debug)]
struct Inner {
    name: String,
    category: Category,
    channel: Arc<Channel>,
    state: Mutex<State>,
    pending: Mutex<Vec<u8>>,
}

#[derive(Debug)]
struct State {
    level: Level,
    log_dir: Option<PathBuf>,
    file_output: Option<FileOutput>,
}

#[derive(Debug, Default)]
struct FileOutput {
    attached: Option<AttachedSink>,
}

#[derive(Debug)]
struct AttachedSink {
    id: SinkId,
    sink: Arc<FileSink>,
}

impl FileOutput {
    fn detach(&mut self, channel: &Channel) {
        if let Some(attached) = self.attached.take() {
            channel.remove_sink(attached.id);
            debug!(
                channel = channel.name(),
                path = %attached.sink.path().display(),
                "detached file sink"
            );
        }
    }

    fn attach(&mut self, channel: &Channel, name: &str, dir: &Path, level: Level) -> Result<()> {
        let path = log_file_path(dir, name);
        let sink = Arc::new(FileSink::open(&path, level)?);
        let id = channel.add_sink(sink.clone());
        debug!(channel = channel.name(), path = %path.display(), "attached file sink");

        self.attached = Some(AttachedSink { id, sink });
        Ok(())
    }
}

impl Logger {
    /// Creates a logger with only the base capability: changing its log
    /// directory records the value and nothing else.
    pub fn new(
        name: impl Into<String>,
        category: Category,
        level: Level,
        log_dir: Option<&Path>,
    ) -> Self {
        let logger = Self::build(name.into(), category, level, None);
        logger.inner.state.lock().log_dir = non_empty(log_dir);
        logger
    }

    /// Creates a logger that writes to `<log_dir>/<name>.log` whenever a log
    /// directory is set.
    ///
    /// The level is applied before the directory, so the file sink starts at
    /// `level`.
    ///
    /// # Errors
    ///
    /// Returns an error if the log file cannot be opened.
    pub fn with_file_output(
        name: impl Into<String>,
        category: Category,
        level: Level,
        log_dir: Option<&Path>,
    ) -> Result<Self> {
        let logger = Self::build(name.into(), category, level, Some(FileOutput::default()));
        logger.set_log_directory(log_dir)?;
        Ok(logger)
    }

    fn build(
        name: String,
        category: Category,
        level: Level,
        file_output: Option<FileOutput>,
    ) -> Self {
        let channel = Arc::new(Channel::new(name.as_str()));
        channel.set_level(level);

        Self {
            inner: Arc::new(Inner {
                name,
                category,
                channel,
                state: Mutex::new(State {
                    level,
                    log_dir: None,
                    file_output,
                }),
                pending: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Fully qualified name of the logger
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Category the logger was created for
    #[must_use]
    pub fn category(&self) -> Category {
        self.inner.category
    }

    /// Backend channel the logger writes to
    #[must_use]
    pub fn channel(&self) -> &Arc<Channel> {
        &self.inner.channel
    }

    /// Current level
    #[must_use]
    pub fn level(&self) -> Level {
        self.inner.state.lock().level
    }

    /// Current log directory
    #[must_use]
    pub fn log_directory(&self) -> Option<PathBuf> {
        self.inner.state.lock().log_dir.clone()
    }

    /// Whether the logger has the file output capability.
    #[must_use]
    pub fn has_file_output(&self) -> bool {
        self.inner.state.lock().file_output.is_some()
    }

    /// Path of the currently attached log file, if any.
    #[must_use]
    pub fn log_path(&self) -> Option<PathBuf> {
        self.inner
            .state
            .lock()
            .file_output
            .as_ref()
            .and_then(|output| output.attached.as_ref())
            .map(|attached| attached.sink.path().to_path_buf())
    }

    /// Changes the level of the logger, its channel and its attached file.
    pub fn set_level(&self, level: Level) {
        let mut state = self.inner.state.lock();
        state.level = level;
        self.inner.channel.set_level(level);

        if let Some(attached) = state
            .file_output
            .as_ref()
            .and_then(|output| output.attached.as_ref())
        {
            attached.sink.set_level(level);
        }
    }

    /// Changes the log directory; `None` or an empty path clears it.
    ///
    /// With file output, any attached file is detached first, then a new one
    /// is opened in the directory if one is given. At most one file is ever
    /// attached.
    ///
    /// # Errors
    ///
    /// Returns an error if the new log file cannot be opened; the logger is
    /// then left without a file.
    pub fn set_log_directory(&self, log_dir: Option<&Path>) -> Result<()> {
        let log_dir = non_empty(log_dir);

        let mut state = self.inner.state.lock();
        let level = state.level;
        state.log_dir.clone_from(&log_dir);

        let Some(output) = state.file_output.as_mut() else {
            return Ok(());
        };

        output.detach(&self.inner.channel);
        match log_dir {
            Some(dir) => output.attach(&self.inner.channel, &self.inner.name, &dir, level),
            None => Ok(()),
        }
    }

    /// Whether a record at `level` would be written.
    #[must_use]
    pub fn is_enabled(&self, level: Level) -> bool {
        self.inner.channel.is_enabled(level)
    }

    /// Logs `message` at `level`.
    pub fn log(&self, level: Level, message: &str) {
        self.inner.channel.log(level, message);
    }

    /// Logs `data` as one record at the logger's own level.
    pub fn write(&self, data: &str) {
        let level = self.level();
        self.inner.channel.log(level, data);
    }

    /// Stream compatibility; records are written through as they are logged.
    ///
    /// Bytes held back by the [`io::Write`] adapter are not affected; use
    /// [`io::Write::flush`] for those.
    pub const fn flush(&self) {}

    /// Buffers raw output and logs every complete line in it.
    fn write_bytes(&self, buf: &[u8]) {
        let mut pending = self.inner.pending.lock();
        pending.extend_from_slice(buf);

        let Some(end) = pending.iter().rposition(|&b| b == b'\n') else {
            return;
        };
        let complete: Vec<u8> = pending.drain(..=end).collect();
        drop(pending);

        for line in complete[..end].split(|&b| b == b'\n') {
            self.write_line(line);
        }
    }

    /// Logs whatever partial line is still buffered.
    fn flush_pending(&self) {
        let rest = std::mem::take(&mut *self.inner.pending.lock());
        if !rest.is_empty() {
            self.write_line(&rest);
        }
    }

    fn write_line(&self, line: &[u8]) {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        self.write(&String::from_utf8_lossy(line));
    }

    /// Creates a handle that does not keep the logger alive.
    #[must_use]
    pub fn downgrade(&self) -> WeakLogger {
        WeakLogger {
            inner: Arc::downgrade(&self.inner),
        }
    }
}

impl WeakLogger {
    /// Returns the logger if it is still alive.
    #[must_use]
    pub fn upgrade(&self) -> Option<Logger> {
        self.inner.upgrade().map(|inner| Logger { inner })
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        let rest = std::mem::take(self.pending.get_mut());
        if !rest.is_empty() {
            let line = rest.strip_suffix(b"\r").unwrap_or(&rest[..]);
            let level = self.state.get_mut().level;
            self.channel.log(level, String::from_utf8_lossy(line));
        }

        if let Some(output) = self.state.get_mut().file_output.as_mut() {
            output.detach(&self.channel);
        }
    }
}

/// Line-buffered writer: one record per `\n`-terminated line, decoded once
/// the line is complete. `flush` logs a trailing partial line.
impl io::Write for &Logger {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flush_pending();
        Ok(())
    }
}

impl io::Write for Logger {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::Write::write(&mut &*self, buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        io::Write::flush(&mut &*self)
    }
}

fn non_empty(dir: Option<&Path>) -> Option<PathBuf> {
    dir.filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
}
