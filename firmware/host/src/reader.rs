//! Host-side log reader.
//!
//! A read is two steps:
//!
//! 1. [`LogReader::snapshot`] samples the header register, then the `LOW` and `HIGH`
//!    payload windows, over the register bus.
//! 2. [`Snapshot`] reconstructs the logical stream from what was sampled.
//!
//! There is no lock shared with the firmware. If a push lands between the header read
//! and the window reads, the snapshot is torn: the result is anchored on the header
//! that was read and may carry a few newer bytes at the seam. That is accepted; the
//! reader samples the header a second time and only reports the race through tracing.

use ringlog_common::regmap::{HEADER, PAYLOAD_WINDOWS, RegisterBlock, WORD_SIZE};
use ringlog_common::{HeaderWord, PAYLOAD_CAPACITY, Snapshot};
use tracing::{debug, trace, warn};

use crate::bus::RegisterBus;
use crate::error::{ReaderError, ReaderResult};

/// Reconstructed log contents from one read.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct LogDump {
    /// Write pointer from the header the read was anchored on.
    pub pointer: u16,
    /// Valid length from the same header.
    pub length: u16,
    /// Logical stream, oldest byte first.
    pub bytes: Vec<u8>,
}

impl LogDump {
    /// Number of reconstructed bytes.
    #[inline]
    pub fn len(&self) -> usize { self.bytes.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.bytes.is_empty() }

    /// Lossy UTF-8 view of the stream. A torn seam may contain split characters.
    pub fn text(&self) -> std::borrow::Cow<'_, str> { String::from_utf8_lossy(&self.bytes) }
}

/// Reads the log ring through a [`RegisterBus`].
///
/// The reader keeps no state between reads. The pointer and length a read was
/// anchored on travel with its [`LogDump`].
#[derive(Debug)]
pub struct LogReader<B> {
    bus: B,
}

impl<B: RegisterBus> LogReader<B> {
    pub fn new(bus: B) -> Self { Self { bus } }

    /// Sample the header and both payload windows.
    pub fn snapshot(&mut self) -> ReaderResult<Snapshot> {
        let word = self.bus.read_register(HEADER.address)?;
        let header = HeaderWord::decode(word).map_err(|source| ReaderError::InvalidHeader { word, source })?;
        trace!(word = format_args!("{word:#010x}"), ?header, "header sampled");

        let mut payload = [0u8; PAYLOAD_CAPACITY];
        let mut filled = 0;
        for block in PAYLOAD_WINDOWS {
            self.read_window(block, &mut payload[filled..filled + block.byte_len()])?;
            filled += block.byte_len();
        }

        let after = self.bus.read_register(HEADER.address)?;
        if after != word {
            warn!(
                before = format_args!("{word:#010x}"),
                after = format_args!("{after:#010x}"),
                "ring header moved during read; snapshot may be torn at the seam"
            );
        }

        Snapshot::new(header, payload).map_err(|source| ReaderError::InvalidHeader { word, source })
    }

    /// Read the ring once and reconstruct its logical contents.
    pub fn read_buffer(&mut self) -> ReaderResult<LogDump> {
        let snapshot = self.snapshot()?;
        let (older, newer) = snapshot.segments();

        let mut bytes = Vec::with_capacity(older.len() + newer.len());
        bytes.extend_from_slice(older);
        bytes.extend_from_slice(newer);

        let header = snapshot.header();
        debug!(
            pointer = header.pointer,
            length = header.length,
            wrapped = header.is_saturated(),
            "log ring read"
        );

        Ok(LogDump {
            pointer: header.pointer,
            length: header.length,
            bytes,
        })
    }

    pub fn bus_mut(&mut self) -> &mut B { &mut self.bus }

    fn read_window(
        &mut self,
        block: RegisterBlock,
        out: &mut [u8],
    ) -> ReaderResult<()> {
        let mut words = vec![0u32; block.words];
        self.bus.read_block(block.address, &mut words)?;
        for (chunk, word) in out.chunks_exact_mut(WORD_SIZE).zip(&words) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        trace!(window = block.name, words = block.words, "payload window read");
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use ringlog_common::{RamRegion, RingWriter};

    use super::*;
    use crate::bus::MemoryBus;
    use crate::error::BusError;

    fn reader_for(writer: &RingWriter<RamRegion>) -> LogReader<MemoryBus> {
        LogReader::new(MemoryBus::new(writer.region().as_bytes().to_vec()))
    }

    /// Bus that reports a different header on every other sample.
    struct RacingBus {
        inner: MemoryBus,
        second_header: u32,
        header_reads: usize,
    }

    impl RegisterBus for RacingBus {
        fn read_register(
            &mut self,
            address: u32,
        ) -> Result<u32, BusError> {
            if address == HEADER.address {
                self.header_reads += 1;
                if self.header_reads % 2 == 0 {
                    return Ok(self.second_header);
                }
            }
            self.inner.read_register(address)
        }

        fn read_block(
            &mut self,
            address: u32,
            out: &mut [u32],
        ) -> Result<(), BusError> {
            self.inner.read_block(address, out)
        }
    }

    #[test]
    fn test_reads_pushed_lines() {
        let mut writer = RingWriter::init(RamRegion::new());
        for chunk in [b"AAAA", b"BBBB", b"CCCC"] {
            writer.push(chunk);
        }

        let mut reader = reader_for(&writer);
        let dump = reader.read_buffer().unwrap();
        assert_eq!(dump.bytes, b"AAAABBBBCCCC");
        assert_eq!(dump.length, 12);
        assert_eq!(dump.pointer, 16);

        // Nothing is cached: a second read reports the same anchor
        let again = reader.read_buffer().unwrap();
        assert_eq!((again.pointer, again.length), (16, 12));
    }

    #[test]
    fn test_empty_after_init() {
        let writer = RingWriter::init(RamRegion::new());
        let dump = reader_for(&writer).read_buffer().unwrap();
        assert!(dump.is_empty());
        assert_eq!(dump.length, 0);
        assert_eq!(dump.pointer, 4);
    }

    #[test]
    fn test_wrapped_ring_ends_with_newest() {
        let mut writer = RingWriter::init(RamRegion::new());
        writer.push(&[b'X'; PAYLOAD_CAPACITY]);
        writer.push(b"HELLO");

        let dump = reader_for(&writer).read_buffer().unwrap();
        assert_eq!(dump.len(), PAYLOAD_CAPACITY);
        assert!(dump.bytes.ends_with(b"HELLO"));
        assert!(dump.bytes[..PAYLOAD_CAPACITY - 5].iter().all(|&b| b == b'X'));
    }

    #[test]
    fn test_reads_are_idempotent() {
        let mut writer = RingWriter::init(RamRegion::new());
        for i in 0..400 {
            writer.push_str(if i % 2 == 0 { "[I] 00000001 even\n" } else { "[W] 00000002 odd\n" });
        }

        let mut reader = reader_for(&writer);
        let first = reader.read_buffer().unwrap();
        let second = reader.read_buffer().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_text_view() {
        let mut writer = RingWriter::init(RamRegion::new());
        writer.push_str("[I] 00000010 boot\n");
        let dump = reader_for(&writer).read_buffer().unwrap();
        assert_eq!(dump.text(), "[I] 00000010 boot\n");
    }

    #[test]
    fn test_bus_error_is_surfaced() {
        // Image too short for the HIGH window
        let mut reader = LogReader::new(MemoryBus::new(vec![4, 0, 0, 0, 0, 0, 0, 0]));
        let err = reader.read_buffer().unwrap_err();
        assert!(matches!(err, ReaderError::Bus(BusError::OutOfRange { .. })));
    }

    #[test]
    fn test_invalid_header_rejected() {
        let mut image = vec![0u8; 4096];
        image[..4].copy_from_slice(&0xFFFF_FFFFu32.to_le_bytes());
        let err = LogReader::new(MemoryBus::new(image)).read_buffer().unwrap_err();
        assert!(matches!(err, ReaderError::InvalidHeader { word: 0xFFFF_FFFF, .. }));
    }

    #[test]
    fn test_zeroed_memory_rejected() {
        // Pointer 0 never comes out of the writer
        let err = LogReader::new(MemoryBus::new(vec![0; 4096])).read_buffer().unwrap_err();
        assert!(matches!(err, ReaderError::InvalidHeader { word: 0, .. }));
    }

    #[test]
    fn test_torn_read_anchors_on_first_header() {
        let mut writer = RingWriter::init(RamRegion::new());
        writer.push(b"AAAA");
        let stale = writer.header().pack();
        writer.push(b"BBBB");

        // Payload already holds both pushes, first header sample is the stale one
        let mut image = writer.region().as_bytes().to_vec();
        image[..4].copy_from_slice(&stale.to_le_bytes());
        let bus = RacingBus {
            inner: MemoryBus::new(image),
            second_header: writer.header().pack(),
            header_reads: 0,
        };

        let mut reader = LogReader::new(bus);
        let dump = reader.read_buffer().unwrap();
        assert_eq!(dump.bytes, b"AAAA");
        assert_eq!(reader.bus_mut().header_reads, 2);
    }

    #[test]
    fn test_reader_through_mut_ref() {
        let mut writer = RingWriter::init(RamRegion::new());
        writer.push(b"ready");
        let mut bus = MemoryBus::new(writer.region().as_bytes().to_vec());

        let dump = LogReader::new(&mut bus).read_buffer().unwrap();
        assert_eq!(dump.bytes, b"ready");

        // Firmware keeps writing; the next reader sees it
        bus.image_mut()[..4].copy_from_slice(&HeaderWord::INITIAL.pack().to_le_bytes());
        assert!(LogReader::new(&mut bus).read_buffer().unwrap().is_empty());
    }
}
