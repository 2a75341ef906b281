//! Log record type

use std::borrow::Cow;

use chrono::{DateTime, Utc};

use crate::Level;

/// A single log record, borrowing its message where it can.
#[derive(Debug, Clone)]
pub struct Record<'a> {
    /// Severity of the record
    pub level: Level,
    /// Name of the channel the record was logged on
    pub channel: &'a str,
    /// The log message
    pub message: Cow<'a, str>,
    /// When the record was created
    pub timestamp: DateTime<Utc>,
}

impl<'a> Record<'a> {
    /// Create a new record stamped with the current time.
    #[inline]
    pub fn new(level: Level, channel: &'a str, message: impl Into<Cow<'a, str>>) -> Self {
        Self {
            level,
            channel,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    /// Builder-style method for overriding the timestamp
    #[inline]
    #[must_use]
    pub const fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Convert to owned version (for storing past the logging call)
    #[must_use]
    pub fn to_owned(&self) -> OwnedRecord {
        OwnedRecord {
            level: self.level,
            channel: self.channel.to_string(),
            message: self.message.clone().into_owned(),
            timestamp: self.timestamp,
        }
    }
}

/// Owned version of [`Record`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedRecord {
    /// Severity of the record
    pub level: Level,
    /// Name of the channel the record was logged on
    pub channel: String,
    /// The log message
    pub message: String,
    /// When the record was created
    pub timestamp: DateTime<Utc>,
}
