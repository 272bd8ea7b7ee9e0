//! Shared layout, writer and reconstruction for the circular log transport.
//!
//! This crate is used on both sides of the register bus:
//!
//! - [`layout`]: Region geometry and payload offset arithmetic
//! - [`header`]: Packed header word (`length << 16 | pointer`)
//! - [`region`]: Storage abstraction the writer pushes into
//! - [`writer`]: Firmware-side ring writer
//! - [`snapshot`]: Host-side reconstruction of the logical byte stream
//! - [`regmap`]: Register windows covering the region
//! - [`entry`]: Log line formatting
//!
//! # no_std Compatibility
//!
//! This crate is `no_std` (tests excepted) and performs no allocation, so the firmware
//! links it directly.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]

pub mod entry;
pub mod header;
pub mod layout;
pub mod region;
pub mod regmap;
pub mod snapshot;
pub mod writer;

// Re-export commonly used items
pub use header::{HeaderError, HeaderWord};
pub use layout::{PAYLOAD_CAPACITY, REGION_SIZE};
pub use region::{RamRegion, Region};
pub use snapshot::Snapshot;
pub use writer::RingWriter;
