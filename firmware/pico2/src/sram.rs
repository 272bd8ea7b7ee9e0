//! Volatile ring region backed by a fixed SRAM address.
//!
//! The ring is observed by an agent the compiler knows nothing about (a debugger
//! reading SRAM4 over the bus), so every store goes through `write_volatile` and the
//! header store is preceded by a release fence. That keeps the "payload first, header
//! last" order of [`RingWriter::push`](ringlog_common::RingWriter::push) intact all
//! the way to the memory bus.

use core::ptr::write_volatile;
use core::sync::atomic::{Ordering, fence};

use ringlog_common::Region;
use ringlog_common::layout::{HEADER_OFFSET, REGION_SIZE};

use crate::config::LOG_REGION_BASE;

/// Ring region at a raw memory address.
pub struct VolatileRegion {
    base: *mut u8,
}

// SAFETY: The region is plain memory with no thread affinity. Exclusive access is
// guaranteed by the owner (the firmware keeps the writer behind a critical-section
// mutex), so moving the handle between contexts is sound.
unsafe impl Send for VolatileRegion {}

impl VolatileRegion {
    /// Wrap a raw region pointer.
    ///
    /// # Safety
    /// `base` must be 4-byte aligned and valid for writes of [`REGION_SIZE`] bytes for
    /// as long as the returned value lives, and nothing else may write that memory.
    pub const unsafe fn new(base: *mut u8) -> Self { Self { base } }

    /// The log ring in SRAM4.
    ///
    /// # Safety
    /// Only valid on the RP2350 with SRAM4 excluded from the linker's RAM region, and
    /// at most one instance may exist at a time.
    pub const unsafe fn sram4() -> Self {
        // SAFETY: forwarded to the caller
        unsafe { Self::new(LOG_REGION_BASE as usize as *mut u8) }
    }

    /// Base address of the region.
    #[inline]
    pub fn base(&self) -> usize { self.base as usize }
}

impl Region for VolatileRegion {
    fn write_bytes(
        &mut self,
        offset: usize,
        bytes: &[u8],
    ) {
        debug_assert!(offset + bytes.len() <= REGION_SIZE);
        for (i, &byte) in bytes.iter().enumerate() {
            // SAFETY: bounds checked above against REGION_SIZE, pointer valid per `new`
            unsafe { write_volatile(self.base.add(offset + i), byte) };
        }
    }

    fn write_header(
        &mut self,
        word: u32,
    ) {
        // Payload stores must be visible before the header that describes them
        fence(Ordering::Release);
        // SAFETY: offset 0 of a 4-byte aligned region, valid per `new`
        unsafe { write_volatile(self.base.add(HEADER_OFFSET).cast::<u32>(), word.to_le()) };
    }

    fn clear(&mut self) {
        for i in 0..REGION_SIZE {
            // SAFETY: i < REGION_SIZE, pointer valid per `new`
            unsafe { write_volatile(self.base.add(i), 0) };
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
