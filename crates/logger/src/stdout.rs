//! Console sink

use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
#[cfg(feature = "color")]
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::{Formatter, Level, PlainTextFormatter, Record, Sink};

/// Sink that writes formatted records to stdout.
#[derive(Clone)]
pub struct StdoutSink {
    level: Arc<RwLock<Level>>,
    formatter: Arc<dyn Formatter>,
    /// Lock for stdout (to prevent interleaving)
    #[cfg(not(feature = "color"))]
    stdout: Arc<Mutex<io::Stdout>>,
    #[cfg(feature = "color")]
    stdout: Arc<Mutex<StandardStream>>,
}

impl StdoutSink {
    /// Create a stdout sink using [`PlainTextFormatter`] with channel names.
    #[must_use]
    pub fn new() -> Self {
        Self {
            level: Arc::new(RwLock::new(Level::Info)),
            formatter: Arc::new(PlainTextFormatter::new().with_channel()),
            #[cfg(not(feature = "color"))]
            stdout: Arc::new(Mutex::new(io::stdout())),
            #[cfg(feature = "color")]
            stdout: Arc::new(Mutex::new(StandardStream::stdout(ColorChoice::Auto))),
        }
    }

    /// Create with a specific minimum level
    #[must_use]
    pub fn with_level(self, level: Level) -> Self {
        *self.level.write() = level;
        self
    }

    /// Replace the formatter
    #[must_use]
    pub fn with_formatter(mut self, formatter: impl Formatter) -> Self {
        self.formatter = Arc::new(formatter);
        self
    }
}

impl fmt::Debug for StdoutSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdoutSink")
            .field("level", &self.level())
            .field("formatter", &self.formatter)
            .finish_non_exhaustive()
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for StdoutSink {
    fn emit(&self, record: &Record<'_>) -> io::Result<()> {
        let mut line = String::new();
        self.formatter.format(record, &mut line);

        let mut stdout = self.stdout.lock();

        #[cfg(feature = "color")]
        {
            let color = match record.level {
                Level::Error => Color::Red,
                Level::Warn => Color::Yellow,
                Level::Info => Color::Green,
                Level::Debug => Color::Blue,
                Level::Trace => Color::Magenta,
            };
            stdout.set_color(ColorSpec::new().set_fg(Some(color)))?;
            writeln!(stdout, "{line}")?;
            stdout.reset()?;
        }

        #[cfg(not(feature = "color"))]
        writeln!(stdout, "{line}")?;

        stdout.flush()
    }

    fn flush(&self) -> io::Result<()> {
        self.stdout.lock().flush()
    }

    fn level(&self) -> Level {
        *self.level.read()
    }

    fn set_level(&self, level: Level) {
        *self.level.write() = level;
    }
}
