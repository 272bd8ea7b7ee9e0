//! Reconstruction of the logical log stream from a raw region image.
//!
//! A [`Snapshot`] is a header word plus a copy of the whole payload area, taken at
//! some instant by the reader. Reconstruction is a pure function of that pair, which
//! makes torn snapshots (header and payload from different pushes) reproducible in
//! tests by building the two halves from different writer states.
//!
//! While `length < PAYLOAD_CAPACITY` the ring has never wrapped and the stream is the
//! payload prefix. Once saturated, the oldest surviving byte sits at the write pointer
//! and the stream is `payload[ptr..] ++ payload[..ptr]` (payload-relative offsets).

use crate::header::{HeaderError, HeaderWord};
use crate::layout::{PAYLOAD_CAPACITY, PAYLOAD_START, REGION_SIZE};

/// Header plus payload image as read by the host.
#[derive(Clone)]
pub struct Snapshot {
    header: HeaderWord,
    payload: [u8; PAYLOAD_CAPACITY],
}

impl Snapshot {
    /// Build a snapshot from a decoded header and a payload image.
    ///
    /// `payload[0]` corresponds to region offset 4.
    pub fn new(
        header: HeaderWord,
        payload: [u8; PAYLOAD_CAPACITY],
    ) -> Result<Self, HeaderError> {
        header.validate()?;
        Ok(Self { header, payload })
    }

    /// Build a snapshot from a full region image (header at offset 0).
    pub fn from_region(image: &[u8; REGION_SIZE]) -> Result<Self, HeaderError> {
        let header = HeaderWord::from_le_bytes([image[0], image[1], image[2], image[3]]);
        let mut payload = [0u8; PAYLOAD_CAPACITY];
        payload.copy_from_slice(&image[PAYLOAD_START..]);
        Self::new(header, payload)
    }

    /// Header the reconstruction is anchored on.
    #[inline]
    pub const fn header(&self) -> HeaderWord { self.header }

    /// Number of bytes in the logical stream.
    #[inline]
    pub const fn len(&self) -> usize { self.header.length as usize }

    /// True when nothing has been written since initialization.
    #[inline]
    pub const fn is_empty(&self) -> bool { self.header.length == 0 }

    /// The logical stream as two slices, oldest bytes first.
    ///
    /// The second slice is empty until the ring has wrapped.
    pub fn segments(&self) -> (&[u8], &[u8]) {
        let length = self.len();
        if length < PAYLOAD_CAPACITY {
            return (&self.payload[..length], &self.payload[..0]);
        }

        let split = self.header.pointer as usize - PAYLOAD_START;
        let (newer, older) = self.payload.split_at(split);
        (older, newer)
    }

    /// Copy the logical stream into `out`, returning the number of bytes written.
    pub fn linearize(
        &self,
        out: &mut [u8; PAYLOAD_CAPACITY],
    ) -> usize {
        let (older, newer) = self.segments();
        out[..older.len()].copy_from_slice(older);
        out[older.len()..older.len() + newer.len()].copy_from_slice(newer);
        older.len() + newer.len()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::RamRegion;
    use crate::writer::RingWriter;

    fn snapshot_of(writer: &RingWriter<RamRegion>) -> Snapshot {
        Snapshot::from_region(writer.region().as_bytes()).unwrap()
    }

    fn stream_of(snapshot: &Snapshot) -> Vec<u8> {
        let mut out = [0u8; PAYLOAD_CAPACITY];
        let len = snapshot.linearize(&mut out);
        out[..len].to_vec()
    }

    #[test]
    fn test_initialized_ring_is_empty() {
        let writer = RingWriter::init(RamRegion::new());
        let snapshot = snapshot_of(&writer);
        assert!(snapshot.is_empty());
        assert_eq!(stream_of(&snapshot), b"");
    }

    #[test]
    fn test_prefix_before_wrap() {
        let mut writer = RingWriter::init(RamRegion::new());
        for message in ["AAAA", "BBBB", "CCCC"] {
            writer.push_str(message);
        }

        let snapshot = snapshot_of(&writer);
        assert_eq!(snapshot.len(), 12);
        assert_eq!(stream_of(&snapshot), b"AAAABBBBCCCC");
        assert!(snapshot.segments().1.is_empty());
    }

    #[test]
    fn test_wrapped_ring_ends_with_newest() {
        let mut writer = RingWriter::init(RamRegion::new());
        writer.push(&[b'X'; 4092]);
        writer.push(b"HELLO");

        let stream = stream_of(&snapshot_of(&writer));
        assert_eq!(stream.len(), PAYLOAD_CAPACITY);
        assert!(stream.ends_with(b"HELLO"));
        assert!(stream[..PAYLOAD_CAPACITY - 5].iter().all(|&b| b == b'X'));
    }

    #[test]
    fn test_wrapped_seam_is_joined() {
        let mut writer = RingWriter::init(RamRegion::new());
        writer.push(&[b'.'; 4090]);
        writer.push(b"HELLO");

        let snapshot = snapshot_of(&writer);
        let (older, newer) = snapshot.segments();
        assert_eq!(newer, b"LLO");
        assert!(older.ends_with(b"HE"));
        assert!(stream_of(&snapshot).ends_with(b"HELLO"));
    }

    #[test]
    fn test_exactly_full_is_unrotated() {
        let mut writer = RingWriter::init(RamRegion::new());
        let message: Vec<u8> = (0..PAYLOAD_CAPACITY).map(|i| (i % 251) as u8).collect();
        writer.push(&message);

        assert_eq!(writer.pointer(), 4);
        assert_eq!(stream_of(&snapshot_of(&writer)), message);
    }

    #[test]
    fn test_reads_are_repeatable() {
        let mut writer = RingWriter::init(RamRegion::new());
        for i in 0..500u32 {
            writer.push_str(if i % 2 == 0 { "even line\n" } else { "odd\n" });
        }
        let first = stream_of(&snapshot_of(&writer));
        let second = stream_of(&snapshot_of(&writer));
        assert_eq!(first, second);
    }

    #[test]
    fn test_torn_snapshot_uses_stale_header() {
        // Header sampled before the last push, payload sampled after it
        let mut writer = RingWriter::init(RamRegion::new());
        writer.push(b"first;");
        let stale = writer.header();
        writer.push(b"second;");

        let image = writer.region().as_bytes();
        let mut payload = [0u8; PAYLOAD_CAPACITY];
        payload.copy_from_slice(&image[PAYLOAD_START..]);
        let torn = Snapshot::new(stale, payload).unwrap();

        // The stale header never claims bytes the payload does not hold
        assert_eq!(stream_of(&torn), b"first;");
    }

    #[test]
    fn test_invalid_header_rejected() {
        let mut image = [0u8; REGION_SIZE];
        assert!(Snapshot::from_region(&image).is_err());

        image[..4].copy_from_slice(&HeaderWord::INITIAL.to_le_bytes());
        assert!(Snapshot::from_region(&image).is_ok());
    }
}
