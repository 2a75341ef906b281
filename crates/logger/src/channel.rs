//! Named log channels

use std::borrow::Cow;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use parking_lot::RwLock;
use tracing::warn;

use crate::{Level, Record, Sink, SinkId};

/// A named channel that filters records by level and fans them out to its
/// sinks.
///
/// Sink failures are never returned to the caller of [`Channel::log`]; they
/// are reported as `tracing` warnings instead.
#[derive(Debug)]
pub struct Channel {
    name: String,
    level: RwLock<Level>,
    sinks: RwLock<Vec<(SinkId, Arc<dyn Sink>)>>,
    propagate: AtomicBool,
    next_sink_id: AtomicU64,
}

impl Channel {
    /// Create a channel at [`Level::Info`] with no sinks and propagation off.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: RwLock::new(Level::default()),
            sinks: RwLock::new(Vec::new()),
            propagate: AtomicBool::new(false),
            next_sink_id: AtomicU64::new(0),
        }
    }

    /// Name of the channel
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current threshold
    #[must_use]
    pub fn level(&self) -> Level {
        *self.level.read()
    }

    /// Change the threshold
    pub fn set_level(&self, level: Level) {
        *self.level.write() = level;
    }

    /// Check if a level passes the channel threshold
    #[inline]
    #[must_use]
    pub fn is_enabled(&self, level: Level) -> bool {
        level.passes(self.level())
    }

    /// Whether records are also re-emitted as `tracing` events.
    #[must_use]
    pub fn propagates(&self) -> bool {
        self.propagate.load(Ordering::Relaxed)
    }

    /// Turn re-emission to `tracing` on or off.
    pub fn set_propagate(&self, propagate: bool) {
        self.propagate.store(propagate, Ordering::Relaxed);
    }

    /// Attach a sink; records are delivered to sinks in attachment order.
    pub fn add_sink(&self, sink: Arc<dyn Sink>) -> SinkId {
        let id = SinkId(self.next_sink_id.fetch_add(1, Ordering::Relaxed));
        self.sinks.write().push((id, sink));
        id
    }

    /// Detach a sink, flushing it on the way out.
    ///
    /// Returns `None` if no sink with that id is attached.
    pub fn remove_sink(&self, id: SinkId) -> Option<Arc<dyn Sink>> {
        let sink = {
            let mut sinks = self.sinks.write();
            let index = sinks.iter().position(|(sink_id, _)| *sink_id == id)?;
            sinks.remove(index).1
        };

        if let Err(e) = sink.flush() {
            warn!(channel = %self.name, sink = %id, "failed to flush detached sink: {e}");
        }

        Some(sink)
    }

    /// Number of attached sinks
    #[must_use]
    pub fn sink_count(&self) -> usize {
        self.sinks.read().len()
    }

    /// Log `message` at `level`.
    pub fn log<'a>(&'a self, level: Level, message: impl Into<Cow<'a, str>>) {
        if !self.is_enabled(level) {
            return;
        }

        let record = Record::new(level, &self.name, message);

        for (id, sink) in self.sinks.read().iter() {
            if !sink.is_enabled(level) {
                continue;
            }
            if let Err(e) = sink.emit(&record) {
                warn!(channel = %self.name, sink = %id, "failed to emit record: {e}");
            }
        }

        if self.propagates() {
            forward(&record);
        }
    }

    /// Flush every attached sink.
    pub fn flush(&self) {
        for (id, sink) in self.sinks.read().iter() {
            if let Err(e) = sink.flush() {
                warn!(channel = %self.name, sink = %id, "failed to flush sink: {e}");
            }
        }
    }
}

fn forward(record: &Record<'_>) {
    let channel = record.channel;
    let message = &record.message;

    match record.level {
        Level::Trace => tracing::trace!(channel, "{message}"),
        Level::Debug => tracing::debug!(channel, "{message}"),
        Level::Info => tracing::info!(channel, "{message}"),
        Level::Warn => tracing::warn!(channel, "{message}"),
        Level::Error => tracing::error!(channel, "{message}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemorySink;

    use std::io;

    use tracing_test::traced_test;

    #[derive(Debug)]
    struct BrokenSink;

    impl Sink for BrokenSink {
        fn emit(&self, _record: &Record<'_>) -> io::Result<()> {
            Err(io::Error::other("disk full"))
        }

        fn flush(&self) -> io::Result<()> {
            Ok(())
        }

        fn level(&self) -> Level {
            Level::Trace
        }

        fn set_level(&self, _level: Level) {}
    }

    #[test]
    fn test_sink_ids_are_unique() {
        let channel = Channel::new("a");
        let first = channel.add_sink(Arc::new(MemorySink::new()));
        let second = channel.add_sink(Arc::new(MemorySink::new()));

        assert_ne!(first, second);
        assert_eq!(channel.sink_count(), 2);
    }

    #[test]
    #[traced_test]
    fn test_broken_sink_does_not_stop_others() {
        let channel = Channel::new("pexpect.sw1");
        let memory = MemorySink::new();
        channel.add_sink(Arc::new(BrokenSink));
        channel.add_sink(Arc::new(memory.clone()));

        channel.log(Level::Info, "still delivered");

        assert_eq!(memory.messages(), vec!["still delivered".to_string()]);
        assert!(logs_contain("failed to emit record: disk full"));
    }

    #[test]
    #[traced_test]
    fn test_propagate_forwards_to_tracing() {
        let channel = Channel::new("run42.pexpect.sw1");

        channel.log(Level::Warn, "not forwarded");
        assert!(!logs_contain("not forwarded"));

        channel.set_propagate(true);
        channel.log(Level::Warn, "forwarded");
        assert!(logs_contain("forwarded"));
        assert!(logs_contain("run42.pexpect.sw1"));
    }
}
