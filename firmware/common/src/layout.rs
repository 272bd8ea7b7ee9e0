//! Bit-exact layout of the log ring region.
//!
//! ```text
//! offset 0          4                                        4095
//!        +----------+------------------------------------------+
//!        | header   | payload (wraps from 4095 back to 4)      |
//!        +----------+------------------------------------------+
//!          4 bytes    4092 bytes
//! ```
//!
//! The same constants are used by the firmware writer and the host reader, so the
//! usable payload length has exactly one definition: [`PAYLOAD_CAPACITY`].

// =============================================================================
// Region Geometry
// =============================================================================

/// Total size of the ring region in bytes.
pub const REGION_SIZE: usize = 4096;

/// Offset of the packed header word.
pub const HEADER_OFFSET: usize = 0;

/// Size of the packed header word in bytes.
pub const HEADER_SIZE: usize = 4;

/// Offset of the first payload byte. The write pointer wraps back here, never to 0.
pub const PAYLOAD_START: usize = HEADER_OFFSET + HEADER_SIZE;

/// Highest byte address inside the region (last payload byte).
pub const MAX_ADDRESS: usize = REGION_SIZE - 1;

/// Number of payload bytes, offsets 4..=4095.
pub const PAYLOAD_CAPACITY: usize = MAX_ADDRESS - PAYLOAD_START + 1;

/// Saturation value of the header `length` field (1023 words of 4 bytes).
pub const LENGTH_CAP: u16 = 1023 * 4;

/// Write pointer after initialization.
pub const INITIAL_POINTER: u16 = PAYLOAD_START as u16;

const _: () = assert!(PAYLOAD_CAPACITY == 4092);
const _: () = assert!(LENGTH_CAP as usize == PAYLOAD_CAPACITY);
const _: () = assert!(MAX_ADDRESS <= u16::MAX as usize);

// =============================================================================
// Offset Helpers
// =============================================================================

/// Returns true if `pointer` is a valid write position (inside the payload area).
#[inline]
pub const fn is_payload_address(pointer: usize) -> bool { pointer >= PAYLOAD_START && pointer <= MAX_ADDRESS }

/// Advance a payload address by `count` bytes, wrapping inside `[PAYLOAD_START, MAX_ADDRESS]`.
///
/// `pointer` must already be a payload address.
#[inline]
pub const fn advance(
    pointer: usize,
    count: usize,
) -> usize {
    let relative = (pointer - PAYLOAD_START + count % PAYLOAD_CAPACITY) % PAYLOAD_CAPACITY;
    PAYLOAD_START + relative
}

// =============================================================================
// Tests
// =============================================================================
