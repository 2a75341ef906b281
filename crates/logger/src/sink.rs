//! Output sink trait

use std::fmt;
use std::io;

use crate::{Level, Record};

/// Identifies a sink attached to a [`Channel`](crate::Channel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SinkId(pub(crate) u64);

impl fmt::Display for SinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sink-{}", self.0)
    }
}

/// An output destination for records.
///
/// A sink carries its own threshold on top of the channel's, so one channel
/// can feed a verbose file and a terse console at the same time.
pub trait Sink: Send + Sync + fmt::Debug + 'static {
    /// Write a record. Only called for records that pass [`Sink::is_enabled`].
    ///
    /// # Errors
    ///
    /// Returns the I/O error of the underlying output.
    fn emit(&self, record: &Record<'_>) -> io::Result<()>;

    /// Flush anything the sink holds back.
    ///
    /// # Errors
    ///
    /// Returns the I/O error of the underlying output.
    fn flush(&self) -> io::Result<()>;

    /// Current threshold of the sink
    fn level(&self) -> Level;

    /// Change the threshold of the sink
    fn set_level(&self, level: Level);

    /// Check if a level is enabled (for fast filtering)
    #[inline]
    fn is_enabled(&self, level: Level) -> bool {
        level.passes(self.level())
    }
}
