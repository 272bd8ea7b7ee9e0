//! Log line formatting shared by the firmware logger and the host simulator.
//!
//! Every line pushed into the ring has the shape:
//!
//! ```text
//! [I] 00012345 message text\n
//! ```
//!
//! - `[I]`: level prefix (T, D, I, W, E)
//! - `00012345`: milliseconds since boot, modulo 10^8
//! - message, truncated so the whole line fits in [`LOG_LINE_LEN`] bytes

use core::fmt::Write;

use heapless::String;

/// Maximum length of one formatted line, newline included.
pub const LOG_LINE_LEN: usize = 96;

/// Maximum length of a message before the prefix is added.
pub const LOG_MSG_LEN: usize = 80;

const TIMESTAMP_MODULUS: u32 = 100_000_000;

/// Log severity level.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
#[repr(u8)]
pub enum LogLevel {
    /// Verbose debugging
    Trace = 0,
    /// Debug information
    Debug = 1,
    /// Normal operation
    #[default]
    Info = 2,
    /// Warnings
    Warn = 3,
    /// Errors
    Error = 4,
}

impl LogLevel {
    /// Single-character prefix for this level.
    pub const fn prefix(self) -> char {
        match self {
            Self::Trace => 'T',
            Self::Debug => 'D',
            Self::Info => 'I',
            Self::Warn => 'W',
            Self::Error => 'E',
        }
    }
}

/// Format one ring line. Long messages are cut at a character boundary.
pub fn format_line(
    level: LogLevel,
    timestamp_ms: u32,
    message: &str,
) -> String<LOG_LINE_LEN> {
    let mut line: String<LOG_LINE_LEN> = String::new();
    let _ = write!(line, "[{}] {:08} ", level.prefix(), timestamp_ms % TIMESTAMP_MODULUS);

    // Leave room for the trailing newline
    for c in message.chars() {
        if c == '\n' {
            break;
        }
        if line.len() + c.len_utf8() > LOG_LINE_LEN - 1 {
            break;
        }
        line.push(c).ok();
    }
    line.push('\n').ok();
    line
}

// =============================================================================
// Tests
// =============================================================================
