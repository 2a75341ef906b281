//! In-memory sink
//!
//! Collects records so tests (and hosts that want to inspect output) can look
//! at what was logged.

use std::io;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::{Level, OwnedRecord, Record, Sink};

/// A sink that keeps every record it receives.
///
/// Clones share the same buffer, so a clone can be attached to a channel
/// while the original is kept around for assertions.
#[derive(Debug, Clone)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<OwnedRecord>>>,
    level: Arc<RwLock<Level>>,
}

impl MemorySink {
    /// Create a sink that accepts every level.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            level: Arc::new(RwLock::new(Level::Trace)),
        }
    }

    /// Create with a specific level
    #[must_use]
    pub fn with_level(self, level: Level) -> Self {
        *self.level.write() = level;
        self
    }

    /// All captured records, oldest first.
    #[must_use]
    pub fn records(&self) -> Vec<OwnedRecord> {
        self.records.lock().clone()
    }

    /// Messages of all captured records, oldest first.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .map(|record| record.message.clone())
            .collect()
    }

    /// Check if any captured message contains `text`
    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        self.records
            .lock()
            .iter()
            .any(|record| record.message.contains(text))
    }

    /// Number of captured records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Whether nothing has been captured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Clear captured records
    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for MemorySink {
    fn emit(&self, record: &Record<'_>) -> io::Result<()> {
        self.records.lock().push(record.to_owned());
        Ok(())
    }

    fn flush(&self) -> io::Result<()> {
        // Nothing is buffered
        Ok(())
    }

    fn level(&self) -> Level {
        *self.level.read()
    }

    fn set_level(&self, level: Level) {
        *self.level.write() = level;
    }
}
