//! Task timing constants.

/// Interval between heartbeat log lines.
pub const HEARTBEAT_INTERVAL_MS: u64 = 1000;

/// Button polling period.
pub const BUTTON_POLL_MS: u64 = 10;

/// Debounce duration in milliseconds.
pub const DEBOUNCE_MS: u64 = 50;

const _: () = assert!(BUTTON_POLL_MS < DEBOUNCE_MS);
