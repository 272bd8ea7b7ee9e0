//! Firmware-side log writer.
//!
//! Appends raw message bytes to the payload area, wrapping from offset 4095 back to
//! offset 4, and publishes the packed header word as the last step of every push.
//!
//! # Ordering
//!
//! There is no lock shared with the reader. A push writes all of its payload bytes
//! first and the header last, so a reader that samples the header mid-push sees the
//! header of the previous push. Payload bytes near the write pointer may already be
//! overwritten in that window; the reader accepts this as a torn snapshot.

use core::fmt;

use crate::header::HeaderWord;
use crate::layout::{INITIAL_POINTER, LENGTH_CAP, MAX_ADDRESS, PAYLOAD_CAPACITY, PAYLOAD_START, advance};
use crate::region::Region;

/// Ring writer owning the write pointer, the saturating length and the region handle.
pub struct RingWriter<R: Region> {
    region: R,
    pointer: u16,
    length: u16,
}

impl<R: Region> RingWriter<R> {
    /// Zero the region, reset the cursors and publish the initial header.
    pub fn init(mut region: R) -> Self {
        region.clear();
        region.write_header(HeaderWord::INITIAL.pack());
        Self {
            region,
            pointer: INITIAL_POINTER,
            length: 0,
        }
    }

    /// Re-run initialization on the owned region (explicit reset).
    pub fn reset(&mut self) {
        self.region.clear();
        self.pointer = INITIAL_POINTER;
        self.length = 0;
        self.publish();
    }

    /// Append `message` to the ring.
    ///
    /// Messages longer than the payload area are accepted: only their last
    /// [`PAYLOAD_CAPACITY`] bytes survive, and the pointer advances as though every
    /// byte had been written.
    pub fn push(
        &mut self,
        message: &[u8],
    ) {
        if message.is_empty() {
            return;
        }

        let total = message.len();
        let mut pointer = self.pointer as usize;
        let mut bytes = message;

        if bytes.len() > PAYLOAD_CAPACITY {
            let skipped = bytes.len() - PAYLOAD_CAPACITY;
            pointer = advance(pointer, skipped);
            bytes = &bytes[skipped..];
        }

        let to_end = MAX_ADDRESS - pointer + 1;
        if bytes.len() <= to_end {
            self.region.write_bytes(pointer, bytes);
        } else {
            let (head, tail) = bytes.split_at(to_end);
            self.region.write_bytes(pointer, head);
            self.region.write_bytes(PAYLOAD_START, tail);
        }

        self.pointer = advance(pointer, bytes.len()) as u16;
        self.length = saturating_length(self.length, total);
        self.publish();
    }

    /// Append a UTF-8 string.
    #[inline]
    pub fn push_str(
        &mut self,
        message: &str,
    ) {
        self.push(message.as_bytes());
    }

    /// Offset of the next byte to be written.
    #[inline]
    pub const fn pointer(&self) -> u16 { self.pointer }

    /// Valid history length reported in the header.
    #[inline]
    pub const fn length(&self) -> u16 { self.length }

    /// Current header value.
    #[inline]
    pub const fn header(&self) -> HeaderWord {
        HeaderWord {
            pointer: self.pointer,
            length: self.length,
        }
    }

    /// Borrow the backing region.
    #[inline]
    pub const fn region(&self) -> &R { &self.region }

    fn publish(&mut self) { self.region.write_header(self.header().pack()) }
}

impl<R: Region> fmt::Write for RingWriter<R> {
    fn write_str(
        &mut self,
        s: &str,
    ) -> fmt::Result {
        self.push_str(s);
        Ok(())
    }
}

/// `min(length + added, LENGTH_CAP)` without overflowing the u16 field.
#[inline]
fn saturating_length(
    length: u16,
    added: usize,
) -> u16 {
    let cap = LENGTH_CAP as usize;
    (length as usize).saturating_add(added).min(cap) as u16
}

// =============================================================================
// Tests
// =============================================================================
