//! Register-access abstraction and the transports that implement it.
//!
//! The reader only needs word reads at byte addresses relative to the ring base.
//! Two transports are provided:
//!
//! - [`MemoryBus`]: an owned byte image (memory dumps, tests)
//! - [`MmapBus`]: a read-only memory mapping of a file or device node, e.g. a UIO
//!   window onto the target's SRAM or the image written by `ringlog-sim`
//!
//! Words are little-endian, matching the RP2350.

use std::fs::File;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};

use memmap2::{Mmap, MmapOptions};
use ringlog_common::regmap::WORD_SIZE;
use tracing::debug;

use crate::error::BusError;

/// Word-oriented register access.
pub trait RegisterBus {
    /// Read the 32-bit register at byte `address`.
    fn read_register(
        &mut self,
        address: u32,
    ) -> Result<u32, BusError>;

    /// Read `out.len()` consecutive registers starting at `address`.
    fn read_block(
        &mut self,
        address: u32,
        out: &mut [u32],
    ) -> Result<(), BusError> {
        for (i, word) in out.iter_mut().enumerate() {
            *word = self.read_register(address + (i * WORD_SIZE) as u32)?;
        }
        Ok(())
    }
}

impl<B: RegisterBus + ?Sized> RegisterBus for &mut B {
    fn read_register(
        &mut self,
        address: u32,
    ) -> Result<u32, BusError> {
        (**self).read_register(address)
    }

    fn read_block(
        &mut self,
        address: u32,
        out: &mut [u32],
    ) -> Result<(), BusError> {
        (**self).read_block(address, out)
    }
}

/// Byte range of `words` registers at `address`, checked against a `size`-byte window.
fn word_range(
    size: usize,
    address: u32,
    words: usize,
) -> Result<Range<usize>, BusError> {
    if address as usize % WORD_SIZE != 0 {
        return Err(BusError::Unaligned { address });
    }

    let start = address as usize;
    let len = words * WORD_SIZE;
    match start.checked_add(len) {
        Some(end) if end <= size => Ok(start..end),
        _ => Err(BusError::OutOfRange { address, len, size }),
    }
}

// =============================================================================
// In-memory Transport
// =============================================================================

/// Register bus over an owned byte image.
#[derive(Clone, Debug, Default)]
pub struct MemoryBus {
    image: Vec<u8>,
}

impl MemoryBus {
    /// Wrap a region image; address 0 is the first byte.
    pub fn new(image: Vec<u8>) -> Self { Self { image } }

    /// Mutable access to the image, for simulating a target that keeps writing.
    pub fn image_mut(&mut self) -> &mut [u8] { &mut self.image }
}

impl RegisterBus for MemoryBus {
    fn read_register(
        &mut self,
        address: u32,
    ) -> Result<u32, BusError> {
        let mut word = [0u32];
        self.read_block(address, &mut word)?;
        Ok(word[0])
    }

    fn read_block(
        &mut self,
        address: u32,
        out: &mut [u32],
    ) -> Result<(), BusError> {
        let range = word_range(self.image.len(), address, out.len())?;
        for (word, chunk) in out.iter_mut().zip(self.image[range].chunks_exact(WORD_SIZE)) {
            *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Ok(())
    }
}

// =============================================================================
// Memory-mapped Transport
// =============================================================================

/// Register bus over a read-only memory mapping.
///
/// Every read goes to the mapping, so a file that another process keeps writing
/// (or a device window onto live target memory) is observed as it changes. Each
/// register is fetched with a single aligned 32-bit load, so a header published
/// with one store is never seen half-written.
pub struct MmapBus {
    path: PathBuf,
    map: Mmap,
}

impl MmapBus {
    /// Map `len` bytes of `path` starting at byte `offset`, which must be word aligned.
    pub fn open(
        path: &Path,
        offset: u64,
        len: usize,
    ) -> Result<Self, BusError> {
        if offset % WORD_SIZE as u64 != 0 {
            return Err(BusError::UnalignedBase { offset });
        }

        let io_err = |source| BusError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(io_err)?;
        let metadata = file.metadata().map_err(io_err)?;
        let required = offset + len as u64;
        // Device nodes report no length and are mapped as-is
        if metadata.is_file() && metadata.len() < required {
            return Err(BusError::Truncated {
                path: path.to_path_buf(),
                size: metadata.len(),
                required,
            });
        }

        // SAFETY: the mapping is read-only and covers the file. Other writers may change
        // the bytes underneath; reads copy words out and never assume stable contents.
        let map = unsafe { MmapOptions::new().offset(offset).len(len).map(&file) }.map_err(io_err)?;
        debug!(path = %path.display(), offset, len, "mapped register window");

        Ok(Self {
            path: path.to_path_buf(),
            map,
        })
    }

    /// Backing path of the mapping.
    pub fn path(&self) -> &Path { &self.path }
}

impl std::fmt::Debug for MmapBus {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("MmapBus")
            .field("path", &self.path)
            .field("len", &self.map.len())
            .finish()
    }
}

impl RegisterBus for MmapBus {
    fn read_register(
        &mut self,
        address: u32,
    ) -> Result<u32, BusError> {
        let mut word = [0u32];
        self.read_block(address, &mut word)?;
        Ok(word[0])
    }

    fn read_block(
        &mut self,
        address: u32,
        out: &mut [u32],
    ) -> Result<(), BusError> {
        let range = word_range(self.map.len(), address, out.len())?;
        let base = self.map[range].as_ptr().cast::<u32>();
        for (i, word) in out.iter_mut().enumerate() {
            // SAFETY: `range` lies inside the mapping, which starts on a page boundary plus
            // a word-aligned offset, so every register is aligned. Atomic loads of this
            // size are allowed on read-only memory.
            let register = unsafe { AtomicU32::from_ptr(base.add(i).cast_mut()) };
            *word = u32::from_le(register.load(Ordering::Acquire));
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
