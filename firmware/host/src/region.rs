//! File-backed ring region for simulating the firmware on the host.
//!
//! `ringlog-sim` pushes through the same [`RingWriter`](ringlog_common::RingWriter)
//! the firmware uses, into a shared file mapping that `ringlog-dump` (or any
//! [`MmapBus`](crate::bus::MmapBus)) reads concurrently.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};

use memmap2::{MmapMut, MmapOptions};
use ringlog_common::Region;
use ringlog_common::layout::{HEADER_OFFSET, REGION_SIZE};
use ringlog_common::regmap::WORD_SIZE;
use tracing::debug;

use crate::error::BusError;

/// Writable ring region mapped from a file.
pub struct MmapRegion {
    path: PathBuf,
    map: MmapMut,
}

impl MmapRegion {
    /// Map [`REGION_SIZE`] bytes of `path` at byte `offset`, creating or growing the
    /// file as needed. Existing contents are kept; call
    /// [`RingWriter::init`](ringlog_common::RingWriter::init) to start a fresh ring.
    ///
    /// `offset` must be word aligned so the header can be published with one store.
    pub fn create(
        path: &Path,
        offset: u64,
    ) -> Result<Self, BusError> {
        if offset % WORD_SIZE as u64 != 0 {
            return Err(BusError::UnalignedBase { offset });
        }

        let io_err = |source| BusError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(io_err)?;

        let required = offset + REGION_SIZE as u64;
        if file.metadata().map_err(io_err)?.len() < required {
            file.set_len(required).map_err(io_err)?;
        }

        // SAFETY: we just sized the file to cover the mapping. Other processes may map
        // the same file read-only; they only ever observe it through copies.
        let map = unsafe { MmapOptions::new().offset(offset).len(REGION_SIZE).map_mut(&file) }.map_err(io_err)?;
        debug!(path = %path.display(), offset, "mapped ring region for writing");

        Ok(Self {
            path: path.to_path_buf(),
            map,
        })
    }

    pub fn path(&self) -> &Path { &self.path }

    /// Current region contents.
    pub fn as_bytes(&self) -> &[u8] { &self.map }

    /// Flush dirty pages to the backing file.
    pub fn flush(&self) -> Result<(), BusError> {
        self.map.flush().map_err(|source| BusError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl Region for MmapRegion {
    fn write_bytes(
        &mut self,
        offset: usize,
        bytes: &[u8],
    ) {
        self.map[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    fn write_header(
        &mut self,
        word: u32,
    ) {
        let header = self.map[HEADER_OFFSET..].as_mut_ptr().cast::<u32>();
        // SAFETY: the mapping starts on a page boundary plus a word-aligned offset, so
        // the header is aligned, and it stays mapped for the lifetime of `self`.
        let header = unsafe { AtomicU32::from_ptr(header) };
        // Release orders the payload stores before the header
        header.store(word.to_le(), Ordering::Release);
    }

    fn clear(&mut self) { self.map.fill(0); }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use ringlog_common::{RamRegion, RingWriter};

    use super::*;

    #[test]
    fn test_create_sizes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ring.bin");

        let region = MmapRegion::create(&path, 0).unwrap();
        assert_eq!(region.as_bytes().len(), REGION_SIZE);
        assert_eq!(std::fs::metadata(&path).unwrap().len(), REGION_SIZE as u64);
    }

    #[test]
    fn test_matches_ram_region() {
        let dir = tempfile::tempdir().unwrap();
        let mut mapped = RingWriter::init(MmapRegion::create(&dir.path().join("ring.bin"), 0).unwrap());
        let mut ram = RingWriter::init(RamRegion::new());

        for i in 0..300 {
            let line = format!("[I] {i:08} sample {i}\n");
            mapped.push_str(&line);
            ram.push_str(&line);
        }

        assert_eq!(mapped.region().as_bytes(), &ram.region().as_bytes()[..]);
    }

    #[test]
    fn test_contents_reach_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ring.bin");

        let mut writer = RingWriter::init(MmapRegion::create(&path, 0).unwrap());
        writer.push(b"persisted");
        writer.region().flush().unwrap();
        drop(writer);

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..4], &[13, 0, 9, 0]);
        assert_eq!(&bytes[4..13], b"persisted");
    }

    #[test]
    fn test_offset_keeps_leading_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sram.bin");
        std::fs::write(&path, vec![0xEE; 8192]).unwrap();

        let writer = RingWriter::init(MmapRegion::create(&path, 4096).unwrap());
        drop(writer);

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes.len(), 8192);
        assert!(bytes[..4096].iter().all(|&b| b == 0xEE));
        assert_eq!(&bytes[4096..4100], &[4, 0, 0, 0]);
    }

    #[test]
    fn test_unaligned_offset_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = MmapRegion::create(&dir.path().join("ring.bin"), 4098).err().unwrap();
        assert!(matches!(err, BusError::UnalignedBase { offset: 4098 }));
    }

    #[test]
    fn test_header_word_published_whole() {
        let dir = tempfile::tempdir().unwrap();
        let region = MmapRegion::create(&dir.path().join("ring.bin"), 4100).unwrap();
        assert_eq!(region.as_bytes().as_ptr() as usize % WORD_SIZE, 0);

        let mut writer = RingWriter::init(region);
        writer.push(&[b'h'; 300]);
        let bytes = writer.region().as_bytes();
        assert_eq!(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]), writer.header().pack());
        assert_eq!(writer.header().pack(), (300 << 16) | 304);
    }
}
