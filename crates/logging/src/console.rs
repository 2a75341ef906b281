//! Console diagnostics
//!
//! Installs the process-wide `tracing` subscriber the framework prints its
//! own diagnostics through. Loggers handed out by the manager do not write
//! here unless their channel is set to propagate.

use topology_logger::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;

use crate::Result;

/// Sets up a global tracing subscriber printing events at `level` and above.
///
/// # Errors
///
/// This function will return an error if a global subscriber is already set.
pub fn init_console(level: Level) -> Result<()> {
    let subscriber = tracing_subscriber::registry()
        .with(LevelFilter::from(level))
        .with(fmt::Layer::default());

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

/// Sets up the console subscriber from a `-v` count.
///
/// # Errors
///
/// This function will return an error if a global subscriber is already set.
pub fn init_console_verbosity(verbosity: u8) -> Result<()> {
    init_console(Level::from_verbosity(verbosity))
}
