//! Placement of the log ring in RP2350 memory.
//!
//! # Memory Layout (RP2350)
//!
//! - RAM: 512KB at 0x20000000 (striped across SRAM0-7), used by the linker
//! - SRAM4: 4KB at 0x20080000 (direct mapped), reserved for the log ring
//! - SRAM5: 4KB at 0x20081000 (direct mapped), unused
//!
//! SRAM4 is left out of the `RAM` region in `memory.x`, so neither statics nor the
//! stack ever land in it. A debugger reads it over the AHB access port while the
//! core keeps running.

use ringlog_common::layout::REGION_SIZE;

/// Start of the striped main RAM.
pub const RAM_START: u32 = 0x2000_0000;

/// Size of the striped main RAM.
pub const RAM_SIZE: u32 = 512 * 1024;

/// Base address of the log ring (SRAM4).
pub const LOG_REGION_BASE: u32 = 0x2008_0000;

/// Size of SRAM4, equal to the ring region.
pub const LOG_REGION_SIZE: usize = 4 * 1024;

const _: () = assert!(LOG_REGION_SIZE == REGION_SIZE);
const _: () = assert!(LOG_REGION_BASE == RAM_START + RAM_SIZE);
const _: () = assert!(LOG_REGION_BASE % 4 == 0);

// =============================================================================
// Tests
// =============================================================================
