//! Global subscriber installation; kept alone in its own test binary.

use assert_matches::assert_matches;
use topology_logging::{Error, init_console_verbosity};

#[test]
fn test_init_console_once() {
    init_console_verbosity(3).unwrap();

    tracing::debug!("visible at -vvv");

    assert_matches!(init_console_verbosity(0), Err(Error::Subscriber(_)));
}
