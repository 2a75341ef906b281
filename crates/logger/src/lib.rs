//! Named log channels with pluggable sinks.
//!
//! This crate is the backend behind the topology logging façade:
//! - [`Level`] severities with an ordered threshold model
//! - named [`Channel`]s that filter by level and fan out to sinks
//! - [`Sink`]s that receive records: [`FileSink`], [`MemorySink`], [`StdoutSink`]
//! - [`Formatter`]s deciding what a line looks like
//!
//! Logging is synchronous: a call to [`Channel::log`] has reached every sink
//! by the time it returns.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

mod channel;
mod error;
mod file;
mod format;
mod level;
mod memory;
mod record;
mod sink;
mod stdout;

pub use channel::Channel;
pub use error::{Error, Result};
pub use file::FileSink;
pub use format::{Formatter, MessageFormatter, PlainTextFormatter};
pub use level::Level;
pub use memory::MemorySink;
pub use record::{OwnedRecord, Record};
pub use sink::{Sink, SinkId};
pub use stdout::StdoutSink;
