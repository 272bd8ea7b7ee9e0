//! Tracing setup for the host tools.
//!
//! Diagnostics go to stderr so stdout stays a clean copy of the log ring. `RUST_LOG`,
//! when set, replaces the configured level.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Install the global subscriber at `level` (`trace`..`error`).
///
/// Calling this twice is harmless; the second call keeps the first subscriber.
pub fn init(level: &str) -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level.to_ascii_lowercase()))
        .map_err(|e| format!("invalid log filter '{level}': {e}"))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .or_else(|e| {
            if e.to_string().contains("a global default trace dispatcher has already been set") {
                Ok(())
            } else {
                Err(format!("failed to initialize tracing: {e}"))
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice() {
        assert!(init("debug").is_ok());
        assert!(init("info").is_ok());
    }
}
