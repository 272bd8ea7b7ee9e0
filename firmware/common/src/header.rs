//! Packed header word: `bits[31:16] = length`, `bits[15:0] = pointer`.
//!
//! The header is the only metadata shared between writer and reader. It is stored
//! little-endian at offset 0 of the region and is always written as one 32-bit word,
//! after the payload bytes it describes.

use thiserror::Error;

use crate::layout::{INITIAL_POINTER, LENGTH_CAP, is_payload_address};

/// Decoded header word.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct HeaderWord {
    /// Byte offset of the next write, in `[4, 4095]`.
    pub pointer: u16,
    /// Number of valid history bytes, saturating at 4092.
    pub length: u16,
}

/// A header word that the writer could never have produced.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum HeaderError {
    /// Pointer outside the payload area (offset 0..4 or past the region).
    #[error("write pointer {pointer} is outside the payload area")]
    PointerOutOfRange { pointer: u16 },
    /// Length above the saturation cap.
    #[error("length {length} exceeds the payload capacity")]
    LengthOutOfRange { length: u16 },
}

impl HeaderWord {
    /// Header of a freshly initialized ring.
    pub const INITIAL: Self = Self {
        pointer: INITIAL_POINTER,
        length: 0,
    };

    /// Split a raw 32-bit word into its fields without validation.
    #[inline]
    pub const fn unpack(word: u32) -> Self {
        Self {
            pointer: (word & 0xFFFF) as u16,
            length: ((word >> 16) & 0xFFFF) as u16,
        }
    }

    /// Pack into the 32-bit register value.
    #[inline]
    pub const fn pack(self) -> u32 { ((self.length as u32) << 16) | self.pointer as u32 }

    /// Decode a raw word and check it against the layout invariants.
    pub fn decode(word: u32) -> Result<Self, HeaderError> {
        let header = Self::unpack(word);
        header.validate()?;
        Ok(header)
    }

    /// Check the pointer and length ranges.
    pub fn validate(self) -> Result<(), HeaderError> {
        if !is_payload_address(self.pointer as usize) {
            return Err(HeaderError::PointerOutOfRange { pointer: self.pointer });
        }
        if self.length > LENGTH_CAP {
            return Err(HeaderError::LengthOutOfRange { length: self.length });
        }
        Ok(())
    }

    /// True once the writer has produced a full payload's worth of bytes.
    #[inline]
    pub const fn is_saturated(self) -> bool { self.length >= LENGTH_CAP }

    /// Byte representation as stored in the region.
    #[inline]
    pub const fn to_le_bytes(self) -> [u8; 4] { self.pack().to_le_bytes() }

    /// Read the header from the first four bytes of a region image.
    #[inline]
    pub const fn from_le_bytes(bytes: [u8; 4]) -> Self { Self::unpack(u32::from_le_bytes(bytes)) }
}

impl Default for HeaderWord {
    fn default() -> Self { Self::INITIAL }
}

// =============================================================================
// Tests
// =============================================================================
