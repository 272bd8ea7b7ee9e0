//! Register map of the log ring as seen over the register bus.
//!
//! The bus moves 32-bit words. Addresses are byte offsets from the region base,
//! so register `n` of a block sits at `address + 4 * n`.
//!
//! | Register | Address | Words | Region bytes |
//! |----------|---------|-------|--------------|
//! | `HEADER` | 0x000   | 1     | 0..=3        |
//! | `LOW`    | 0x004   | 512   | 4..=2051     |
//! | `HIGH`   | 0x804   | 511   | 2052..=4095  |

use crate::layout::{HEADER_OFFSET, PAYLOAD_CAPACITY, PAYLOAD_START, REGION_SIZE};

/// Width of one bus register in bytes.
pub const WORD_SIZE: usize = 4;

/// A contiguous run of registers.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RegisterBlock {
    /// Name used in diagnostics.
    pub name: &'static str,
    /// Byte address of the first register.
    pub address: u32,
    /// Number of 32-bit registers.
    pub words: usize,
}

impl RegisterBlock {
    /// Size of the block in bytes.
    #[inline]
    pub const fn byte_len(&self) -> usize { self.words * WORD_SIZE }

    /// Byte address one past the last register.
    #[inline]
    pub const fn end(&self) -> u32 { self.address + self.byte_len() as u32 }
}

/// Packed header word.
pub const HEADER: RegisterBlock = RegisterBlock {
    name: "header",
    address: HEADER_OFFSET as u32,
    words: 1,
};

/// First half of the payload.
pub const LOW: RegisterBlock = RegisterBlock {
    name: "low",
    address: PAYLOAD_START as u32,
    words: 512,
};

/// Second half of the payload.
pub const HIGH: RegisterBlock = RegisterBlock {
    name: "high",
    address: LOW.end(),
    words: 511,
};

/// Payload windows in physical order.
pub const PAYLOAD_WINDOWS: [RegisterBlock; 2] = [LOW, HIGH];

const _: () = assert!(LOW.byte_len() + HIGH.byte_len() == PAYLOAD_CAPACITY);
const _: () = assert!(HIGH.end() as usize == REGION_SIZE);

// =============================================================================
// Tests
// =============================================================================
