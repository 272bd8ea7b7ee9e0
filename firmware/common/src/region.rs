//! Backing storage for the log ring.
//!
//! The writer only ever needs three primitives from its memory: copy bytes at an
//! offset, publish the header word, and zero everything. Implementations exist for
//! plain RAM (tests, host tools), volatile MMIO on the RP2350 and memory-mapped files
//! on the host.

use crate::layout::{HEADER_OFFSET, HEADER_SIZE, REGION_SIZE};

/// Write access to a [`REGION_SIZE`]-byte ring region.
///
/// Offsets are byte addresses relative to the region start. Callers guarantee that
/// `offset + bytes.len() <= REGION_SIZE`.
pub trait Region {
    /// Copy `bytes` into the region starting at `offset`.
    fn write_bytes(
        &mut self,
        offset: usize,
        bytes: &[u8],
    );

    /// Publish the packed header word at offset 0.
    ///
    /// Called after every payload write of a push; implementations backed by shared
    /// memory must not let the header become visible before those payload bytes.
    fn write_header(
        &mut self,
        word: u32,
    );

    /// Zero all [`REGION_SIZE`] bytes.
    fn clear(&mut self);
}

impl<R: Region + ?Sized> Region for &mut R {
    #[inline]
    fn write_bytes(
        &mut self,
        offset: usize,
        bytes: &[u8],
    ) {
        (**self).write_bytes(offset, bytes);
    }

    #[inline]
    fn write_header(
        &mut self,
        word: u32,
    ) {
        (**self).write_header(word);
    }

    #[inline]
    fn clear(&mut self) { (**self).clear() }
}

// =============================================================================
// RAM-backed Region
// =============================================================================

/// Plain fixed-size byte array used as a ring region.
#[derive(Clone)]
pub struct RamRegion {
    bytes: [u8; REGION_SIZE],
}

impl RamRegion {
    /// Create a zeroed region.
    pub const fn new() -> Self { Self { bytes: [0; REGION_SIZE] } }

    /// Raw view of the whole region, header included.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; REGION_SIZE] { &self.bytes }
}

impl Default for RamRegion {
    fn default() -> Self { Self::new() }
}

impl Region for RamRegion {
    #[inline]
    fn write_bytes(
        &mut self,
        offset: usize,
        bytes: &[u8],
    ) {
        self.bytes[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    #[inline]
    fn write_header(
        &mut self,
        word: u32,
    ) {
        self.bytes[HEADER_OFFSET..HEADER_OFFSET + HEADER_SIZE].copy_from_slice(&word.to_le_bytes());
    }

    #[inline]
    fn clear(&mut self) { self.bytes.fill(0) }
}

// =============================================================================
// Tests
// =============================================================================
