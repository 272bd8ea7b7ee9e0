//! Firmware configuration.
//!
//! - `memory_map`: Where the log ring lives in RP2350 SRAM
//! - `timing`: Task periods and button debounce

pub mod memory_map;
pub mod timing;

// Re-export at config level for convenience
pub use memory_map::{LOG_REGION_BASE, LOG_REGION_SIZE};
pub use timing::{BUTTON_POLL_MS, DEBOUNCE_MS, HEARTBEAT_INTERVAL_MS};
