//! Global log ring writer with levels and dual-output macros.
//!
//! Every `log_*!` call formats its message once, sends it to defmt (RTT) and appends
//! a `[L] TTTTTTTT message` line to the ring in SRAM4.
//!
//! # Usage
//!
//! ```ignore
//! log_info!("exposure started");
//! log_warn!("readout fifo at {}%", fill);
//! log_error!("sensor timeout");
//! ```
//!
//! The writer lives behind a critical-section mutex, so a push is never interleaved
//! with another push from an interrupt. The host reader shares no lock with us; it
//! relies on the header being published after the payload.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use ringlog_common::entry::{LogLevel, format_line};
use ringlog_common::{HeaderWord, RingWriter};
use ringlog_pico2::sram::VolatileRegion;

pub use ringlog_common::entry::LOG_MSG_LEN;

/// The single ring writer, `None` until [`init`] runs.
static RING_LOG: Mutex<CriticalSectionRawMutex, RefCell<Option<RingWriter<VolatileRegion>>>> =
    Mutex::new(RefCell::new(None));

/// Zero SRAM4 and install the ring writer.
pub fn init() {
    // SAFETY: memory.x keeps SRAM4 out of the RAM region and this is the only
    // place a VolatileRegion over it is created
    let region = unsafe { VolatileRegion::sram4() };
    let writer = RingWriter::init(region);
    RING_LOG.lock(|cell| {
        cell.replace(Some(writer));
    });
}

/// Explicit reset: zero the region and restart at pointer 4.
pub fn reset() {
    RING_LOG.lock(|cell| {
        if let Some(writer) = cell.borrow_mut().as_mut() {
            writer.reset();
        }
    });
}

/// Header as last published, if the ring is initialized.
pub fn header() -> Option<HeaderWord> { RING_LOG.lock(|cell| cell.borrow().as_ref().map(RingWriter::header)) }

/// Milliseconds since boot, truncated to 32 bits.
#[inline]
pub fn current_timestamp_ms() -> u32 { embassy_time::Instant::now().as_millis() as u32 }

/// Append a formatted line to the ring. Dropped if the ring is not initialized.
pub fn push_log(
    level: LogLevel,
    message: &str,
) {
    let line = format_line(level, current_timestamp_ms(), message);
    RING_LOG.lock(|cell| {
        if let Some(writer) = cell.borrow_mut().as_mut() {
            writer.push_str(&line);
        }
    });
}

/// Log a message at Info level.
macro_rules! log_info {
    ($($arg:tt)*) => {{
        use core::fmt::Write;
        let mut buf: heapless::String<{ $crate::firmware::logger::LOG_MSG_LEN }> = heapless::String::new();
        let _ = write!(buf, $($arg)*);
        $crate::firmware::logger::push_log(ringlog_common::entry::LogLevel::Info, buf.as_str());
        defmt::info!($($arg)*);
    }};
}

/// Log a message at Warn level.
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        use core::fmt::Write;
        let mut buf: heapless::String<{ $crate::firmware::logger::LOG_MSG_LEN }> = heapless::String::new();
        let _ = write!(buf, $($arg)*);
        $crate::firmware::logger::push_log(ringlog_common::entry::LogLevel::Warn, buf.as_str());
        defmt::warn!($($arg)*);
    }};
}

/// Log a message at Error level.
#[allow(unused_macros)]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        use core::fmt::Write;
        let mut buf: heapless::String<{ $crate::firmware::logger::LOG_MSG_LEN }> = heapless::String::new();
        let _ = write!(buf, $($arg)*);
        $crate::firmware::logger::push_log(ringlog_common::entry::LogLevel::Error, buf.as_str());
        defmt::error!($($arg)*);
    }};
}

/// Log a message at Debug level.
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        use core::fmt::Write;
        let mut buf: heapless::String<{ $crate::firmware::logger::LOG_MSG_LEN }> = heapless::String::new();
        let _ = write!(buf, $($arg)*);
        $crate::firmware::logger::push_log(ringlog_common::entry::LogLevel::Debug, buf.as_str());
        defmt::debug!($($arg)*);
    }};
}
