//! Timestamp-indexed raw frame store.
//!
//! One store file per recorded stream: a fixed-size header followed by
//! length-prefixed frame records. Opening a store scans the records once to
//! build an in-memory timestamp index, so lookups by requested timestamp
//! are a binary search plus one payload read.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::error::{Error, Result};

/// Magic bytes at the start of a store file.
pub const STORE_MAGIC: [u8; 4] = *b"DRSH";

/// Current store format version.
pub const STORE_VERSION: u16 = 1;

/// Size of the store file header in bytes.
pub const HEADER_SIZE: usize = 48;

/// Maximum accepted frame payload, as a corruption guard.
const MAX_FRAME_BYTES: usize = 64 * 1024 * 1024;

/// Store file header (fixed 48-byte region).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreHeader {
    /// Magic bytes: "DRSH"
    pub magic: [u8; 4],
    /// File format version
    pub version: u16,
    /// Total number of frames in the file
    pub frame_count: u64,
    /// Timestamp of the first frame (microseconds since epoch)
    pub start_time_us: u64,
    /// Timestamp of the last frame (microseconds since epoch)
    pub end_time_us: u64,
    /// Reserved for future use
    pub reserved: [u8; 8],
}

impl StoreHeader {
    /// Create a header with empty counters.
    pub fn new() -> Self {
        Self {
            magic: STORE_MAGIC,
            version: STORE_VERSION,
            frame_count: 0,
            start_time_us: 0,
            end_time_us: 0,
            reserved: [0; 8],
        }
    }

    /// Check the magic bytes.
    pub fn is_valid(&self) -> bool {
        self.magic == STORE_MAGIC
    }

    /// Recording duration in microseconds.
    pub fn duration_us(&self) -> u64 {
        self.end_time_us.saturating_sub(self.start_time_us)
    }
}

impl Default for StoreHeader {
    fn default() -> Self {
        Self::new()
    }
}

/// One recorded frame: raw sample bytes plus sub-entity count.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct FrameRecord {
    /// Timestamp in microseconds since epoch
    timestamp_us: u64,
    /// Number of sub-entities in the payload (0 for single-entity streams)
    subframes: u32,
    /// Raw sample bytes
    bytes: Vec<u8>,
}

/// A frame handed to a renderer: the payload is owned by the caller for
/// the duration of one render call.
#[derive(Debug, Clone)]
pub struct FrameRef {
    /// Timestamp of the recorded sample
    pub timestamp_us: u64,
    /// Number of sub-entities in the payload
    pub subframes: u32,
    /// Raw sample bytes
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Copy)]
struct IndexEntry {
    timestamp_us: u64,
    offset: u64,
    len: u32,
    subframes: u32,
}

/// Writes a stream's frames to a store file.
pub struct StoreWriter {
    writer: BufWriter<File>,
    header: StoreHeader,
}

impl StoreWriter {
    /// Create a store file, truncating any existing one.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        // Placeholder header, rewritten by finish().
        let header = StoreHeader::new();
        writer.write_all(&encode_header(&header)?)?;

        Ok(Self { writer, header })
    }

    /// Append one frame.
    pub fn record(&mut self, timestamp_us: u64, subframes: u32, bytes: &[u8]) -> Result<()> {
        let record = FrameRecord {
            timestamp_us,
            subframes,
            bytes: bytes.to_vec(),
        };
        let payload = postcard::to_allocvec(&record)?;

        self.writer
            .write_all(&(payload.len() as u32).to_le_bytes())?;
        self.writer.write_all(&payload)?;

        if self.header.frame_count == 0 {
            self.header.start_time_us = timestamp_us;
        }
        self.header.end_time_us = timestamp_us;
        self.header.frame_count += 1;
        Ok(())
    }

    /// Rewrite the header totals and flush.
    pub fn finish(mut self) -> Result<u64> {
        self.writer.flush()?;
        let file = self.writer.get_mut();
        file.seek(SeekFrom::Start(0))?;
        file.write_all(&encode_header(&self.header)?)?;
        file.flush()?;
        Ok(self.header.frame_count)
    }
}

/// Reads a stream's frames by requested timestamp.
pub struct FrameStore {
    reader: BufReader<File>,
    header: StoreHeader,
    index: Vec<IndexEntry>,
}

impl FrameStore {
    /// Open a store file and build the timestamp index.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);

        let mut header_buffer = [0u8; HEADER_SIZE];
        reader.read_exact(&mut header_buffer)?;
        let header: StoreHeader = postcard::from_bytes(&header_buffer)
            .map_err(|e| Error::InvalidFormat(format!("failed to parse header: {}", e)))?;
        if !header.is_valid() {
            return Err(Error::InvalidFormat("bad store magic bytes".to_string()));
        }

        let index = build_index(&mut reader)?;

        Ok(Self {
            reader,
            header,
            index,
        })
    }

    /// Store file header.
    pub fn header(&self) -> &StoreHeader {
        &self.header
    }

    /// Number of indexed frames.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Check if the store has no frames.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Timestamp of the first frame.
    pub fn start_time_us(&self) -> u64 {
        self.header.start_time_us
    }

    /// Timestamp of the last frame.
    pub fn end_time_us(&self) -> u64 {
        self.header.end_time_us
    }

    /// Iterate over all recorded timestamps in order.
    pub fn timestamps(&self) -> impl Iterator<Item = u64> + '_ {
        self.index.iter().map(|e| e.timestamp_us)
    }

    /// Fetch the recorded frame closest to the requested timestamp.
    ///
    /// Returns `None` for an empty store.
    pub fn nearest(&mut self, timestamp_us: u64) -> Result<Option<FrameRef>> {
        let entry = match self.nearest_entry(timestamp_us) {
            Some(entry) => entry,
            None => return Ok(None),
        };
        self.read_frame(entry).map(Some)
    }

    fn nearest_entry(&self, timestamp_us: u64) -> Option<IndexEntry> {
        if self.index.is_empty() {
            return None;
        }
        let position = self
            .index
            .partition_point(|e| e.timestamp_us < timestamp_us);
        let candidate_after = self.index.get(position);
        let candidate_before = position.checked_sub(1).and_then(|i| self.index.get(i));

        match (candidate_before, candidate_after) {
            (Some(before), Some(after)) => {
                if timestamp_us - before.timestamp_us <= after.timestamp_us - timestamp_us {
                    Some(*before)
                } else {
                    Some(*after)
                }
            }
            (Some(before), None) => Some(*before),
            (None, Some(after)) => Some(*after),
            (None, None) => None,
        }
    }

    fn read_frame(&mut self, entry: IndexEntry) -> Result<FrameRef> {
        self.reader.seek(SeekFrom::Start(entry.offset))?;
        let mut payload = vec![0u8; entry.len as usize];
        self.reader.read_exact(&mut payload)?;
        let record: FrameRecord = postcard::from_bytes(&payload)?;
        Ok(FrameRef {
            timestamp_us: record.timestamp_us,
            subframes: record.subframes,
            bytes: record.bytes,
        })
    }
}

fn encode_header(header: &StoreHeader) -> Result<[u8; HEADER_SIZE]> {
    let mut buffer = [0u8; HEADER_SIZE];
    postcard::to_slice(header, &mut buffer)
        .map_err(|e| Error::Serialization(format!("header encode failed: {}", e)))?;
    Ok(buffer)
}

fn build_index(reader: &mut BufReader<File>) -> Result<Vec<IndexEntry>> {
    let mut index = Vec::new();
    let mut offset = HEADER_SIZE as u64;

    loop {
        let mut len_bytes = [0u8; 4];
        match reader.read_exact(&mut len_bytes) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(e.into()),
        }
        let len = u32::from_le_bytes(len_bytes) as usize;
        if len > MAX_FRAME_BYTES {
            return Err(Error::InvalidFormat(format!(
                "frame record too large: {} bytes",
                len
            )));
        }

        let mut payload = vec![0u8; len];
        reader.read_exact(&mut payload)?;
        let record: FrameRecord = postcard::from_bytes(&payload)?;

        index.push(IndexEntry {
            timestamp_us: record.timestamp_us,
            offset: offset + 4,
            len: len as u32,
            subframes: record.subframes,
        });
        offset += 4 + len as u64;
    }

    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn build_store(path: &Path, timestamps: &[u64]) {
        let mut writer = StoreWriter::create(path).unwrap();
        for (i, &ts) in timestamps.iter().enumerate() {
            writer.record(ts, 0, &[i as u8; 8]).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn test_write_read_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("depth.drsh");
        build_store(&path, &[1000, 2000, 3000]);

        let mut store = FrameStore::open(&path).unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.start_time_us(), 1000);
        assert_eq!(store.end_time_us(), 3000);

        let frame = store.nearest(2000).unwrap().unwrap();
        assert_eq!(frame.timestamp_us, 2000);
        assert_eq!(frame.bytes, vec![1u8; 8]);
    }

    #[test]
    fn test_nearest_picks_closest_sample() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("laser.drsh");
        build_store(&path, &[1000, 2000, 3000]);

        let mut store = FrameStore::open(&path).unwrap();
        assert_eq!(store.nearest(0).unwrap().unwrap().timestamp_us, 1000);
        assert_eq!(store.nearest(1400).unwrap().unwrap().timestamp_us, 1000);
        assert_eq!(store.nearest(1600).unwrap().unwrap().timestamp_us, 2000);
        assert_eq!(store.nearest(9999).unwrap().unwrap().timestamp_us, 3000);
    }

    #[test]
    fn test_subframe_count_survives_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("skeleton.drsh");
        let mut writer = StoreWriter::create(&path).unwrap();
        writer.record(500, 3, &[0u8; 36]).unwrap();
        writer.record(600, 0, &[]).unwrap();
        writer.finish().unwrap();

        let mut store = FrameStore::open(&path).unwrap();
        assert_eq!(store.nearest(500).unwrap().unwrap().subframes, 3);
        let empty = store.nearest(600).unwrap().unwrap();
        assert_eq!(empty.subframes, 0);
        assert!(empty.bytes.is_empty());
    }

    #[test]
    fn test_invalid_file_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.drsh");
        std::fs::write(&path, b"definitely not a frame store").unwrap();
        assert!(FrameStore::open(&path).is_err());
    }

    #[test]
    fn test_empty_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.drsh");
        build_store(&path, &[]);

        let mut store = FrameStore::open(&path).unwrap();
        assert!(store.is_empty());
        assert!(store.nearest(1234).unwrap().is_none());
    }
}
