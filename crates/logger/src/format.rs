//! Line formatters for sinks

use std::fmt::{self, Write as _};

use chrono::SecondsFormat;

use crate::Record;

/// Renders a record into a single line of output.
///
/// Implementations write into `out` without a trailing newline; the sink owns
/// line termination.
pub trait Formatter: Send + Sync + fmt::Debug + 'static {
    /// Append the rendered record to `out`.
    fn format(&self, record: &Record<'_>, out: &mut String);
}

/// Emits the message exactly as logged, with no timestamp or level.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageFormatter;

impl Formatter for MessageFormatter {
    fn format(&self, record: &Record<'_>, out: &mut String) {
        out.push_str(&record.message);
    }
}

/// `timestamp:::LEVEL:::message`, optionally with the channel name between
/// level and message.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextFormatter {
    with_channel: bool,
}

impl PlainTextFormatter {
    /// Separator between fields
    pub const SEPARATOR: &'static str = ":::";

    /// Create a formatter that leaves the channel name out.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            with_channel: false,
        }
    }

    /// Include the channel name in every line.
    #[must_use]
    pub const fn with_channel(mut self) -> Self {
        self.with_channel = true;
        self
    }
}

impl Formatter for PlainTextFormatter {
    fn format(&self, record: &Record<'_>, out: &mut String) {
        let sep = Self::SEPARATOR;
        let timestamp = record.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true);
        let _ = write!(out, "{timestamp}{sep}{}{sep}", record.level);
        if self.with_channel {
            let _ = write!(out, "{}{sep}", record.channel);
        }
        out.push_str(&record.message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Level;

    use chrono::{TimeZone, Utc};

    fn record() -> Record<'static> {
        let timestamp = Utc.with_ymd_and_hms(2016, 3, 1, 12, 30, 0).unwrap();
        Record::new(Level::Warn, "run42.pexpect.sw1", "link down").with_timestamp(timestamp)
    }

    #[test]
    fn test_message_formatter_is_raw() {
        let mut out = String::new();
        MessageFormatter.format(&record(), &mut out);
        assert_eq!(out, "link down");
    }

    #[test]
    fn test_plain_text_formatter() {
        let mut out = String::new();
        PlainTextFormatter::new().format(&record(), &mut out);
        assert_eq!(out, "2016-03-01T12:30:00.000Z:::WARN:::link down");
    }

    #[test]
    fn test_plain_text_formatter_with_channel() {
        let mut out = String::new();
        PlainTextFormatter::new()
            .with_channel()
            .format(&record(), &mut out);
        assert_eq!(
            out,
            "2016-03-01T12:30:00.000Z:::WARN:::run42.pexpect.sw1:::link down"
        );
    }
}
