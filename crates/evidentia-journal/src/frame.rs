//! On-disk layout of `.eaj` journal files.
//!
//! A journal file is a fixed 16-byte header followed by a sequence of
//! record frames. Every frame header carries a checksum of its payload,
//! so a flipped bit in the file body surfaces at read time, before the
//! entry JSON is parsed or its hash chain is consulted. All multi-byte
//! fields are little-endian and the file is never rewritten in place.

use sha2::{Digest, Sha256};

use crate::errors::JournalError;

/// Journal file magic bytes: `b"EAJ1"`.
pub const MAGIC: &[u8; 4] = b"EAJ1";

/// Current journal format version: `0x0001`.
pub const VERSION: u16 = 0x0001;

/// File header size in bytes.
pub const HEADER_SIZE: usize = 16;

/// Frame header size in bytes: kind (1) | reserved (3) | len (4) |
/// checksum (4).
pub const FRAME_HEADER_SIZE: usize = 12;

/// Maximum payload size per frame: 16 MiB.
pub const MAX_PAYLOAD_SIZE: u32 = 16 * 1024 * 1024;

/// Record frame kind: EntryJson.
pub const FRAME_KIND_ENTRY_JSON: u8 = 0x01;

/// Checksum of a frame payload.
///
/// The first four bytes of the payload's SHA-256, read little-endian.
/// Strong enough to catch corruption and casual tampering at the frame
/// level; the per-entry hash chain remains the evidentiary guarantee.
pub fn payload_checksum(payload: &[u8]) -> u32 {
    let digest = Sha256::digest(payload);
    u32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]])
}

/// Journal file header (16 bytes).
///
/// Layout: magic (4) | version LE (2) | flags LE (2) | reserved (8).
/// Flags and reserved bytes must be zero in this version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalHeader {
    /// Magic bytes: `"EAJ1"`.
    pub magic: [u8; 4],
    /// Format version: `0x0001`.
    pub version: u16,
    /// Reserved flags (must be 0).
    pub flags: u16,
}

impl JournalHeader {
    /// Header size constant.
    pub const HEADER_SIZE: usize = HEADER_SIZE;

    /// Creates a header for the current format version.
    pub fn new() -> Self {
        Self {
            magic: *MAGIC,
            version: VERSION,
            flags: 0,
        }
    }

    /// Serializes the header to bytes.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4..6].copy_from_slice(&self.version.to_le_bytes());
        bytes[6..8].copy_from_slice(&self.flags.to_le_bytes());
        // bytes[8..16] stay zero.
        bytes
    }

    /// Deserializes and validates a header.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, JournalError> {
        if bytes.len() < HEADER_SIZE {
            return Err(JournalError::InvalidHeader(format!(
                "header too short: {} bytes",
                bytes.len()
            )));
        }

        let magic = [bytes[0], bytes[1], bytes[2], bytes[3]];
        if magic != *MAGIC {
            return Err(JournalError::InvalidHeader(format!(
                "invalid magic: {:?}, expected {:?}",
                magic, MAGIC
            )));
        }

        let version = u16::from_le_bytes([bytes[4], bytes[5]]);
        if version != VERSION {
            return Err(JournalError::InvalidHeader(format!(
                "unsupported version: 0x{:04x}, expected 0x{:04x}",
                version, VERSION
            )));
        }

        let flags = u16::from_le_bytes([bytes[6], bytes[7]]);
        if flags != 0 {
            return Err(JournalError::InvalidHeader(format!(
                "non-zero flags: 0x{:04x}",
                flags
            )));
        }

        if bytes[8..16].iter().any(|b| *b != 0) {
            return Err(JournalError::InvalidHeader(
                "non-zero reserved bytes".to_string(),
            ));
        }

        Ok(Self {
            magic,
            version,
            flags,
        })
    }
}

impl Default for JournalHeader {
    fn default() -> Self {
        Self::new()
    }
}

/// Record frame kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// EntryJson: UTF-8 JSON object representing one journal entry.
    EntryJson,
    /// Unknown/unsupported frame kind.
    Unknown(u8),
}

impl FrameKind {
    /// Creates a FrameKind from a byte value.
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            FRAME_KIND_ENTRY_JSON => FrameKind::EntryJson,
            _ => FrameKind::Unknown(byte),
        }
    }

    /// Returns the byte value for this kind.
    pub fn to_byte(self) -> u8 {
        match self {
            FrameKind::EntryJson => FRAME_KIND_ENTRY_JSON,
            FrameKind::Unknown(b) => b,
        }
    }
}

/// Record frame header (12 bytes).
///
/// Layout: kind (1) | reserved (3) | payload length LE (4) | payload
/// checksum LE (4).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFrame {
    /// Frame kind.
    pub kind: FrameKind,
    /// Payload length in bytes.
    pub len: u32,
    /// Checksum of the payload; see [`payload_checksum`].
    pub checksum: u32,
}

impl RecordFrame {
    /// Frame header size constant.
    pub const FRAME_HEADER_SIZE: usize = FRAME_HEADER_SIZE;

    /// Builds the frame header for a payload, computing its checksum.
    pub fn for_payload(kind: FrameKind, payload: &[u8]) -> Result<Self, JournalError> {
        if payload.len() as u64 > MAX_PAYLOAD_SIZE as u64 {
            return Err(JournalError::PayloadTooLarge {
                size: payload.len() as u32,
                max: MAX_PAYLOAD_SIZE,
            });
        }
        Ok(Self {
            kind,
            len: payload.len() as u32,
            checksum: payload_checksum(payload),
        })
    }

    /// True when the payload matches this frame's length and checksum.
    pub fn verify_payload(&self, payload: &[u8]) -> bool {
        payload.len() as u64 == self.len as u64 && payload_checksum(payload) == self.checksum
    }

    /// Serializes the frame header to bytes.
    pub fn to_bytes(&self) -> [u8; FRAME_HEADER_SIZE] {
        let mut bytes = [0u8; FRAME_HEADER_SIZE];
        bytes[0] = self.kind.to_byte();
        // bytes[1..4] stay zero.
        bytes[4..8].copy_from_slice(&self.len.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.checksum.to_le_bytes());
        bytes
    }

    /// Deserializes and validates a frame header.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, JournalError> {
        if bytes.len() < FRAME_HEADER_SIZE {
            return Err(JournalError::InvalidFrame {
                offset: 0,
                reason: format!("frame header too short: {} bytes", bytes.len()),
            });
        }

        if bytes[1..4] != [0u8; 3] {
            return Err(JournalError::InvalidFrame {
                offset: 0,
                reason: "non-zero reserved bytes".to_string(),
            });
        }

        let kind = FrameKind::from_byte(bytes[0]);
        let len = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        if len > MAX_PAYLOAD_SIZE {
            return Err(JournalError::InvalidFrame {
                offset: 0,
                reason: format!("payload size {} exceeds maximum {}", len, MAX_PAYLOAD_SIZE),
            });
        }
        let checksum = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);

        Ok(Self {
            kind,
            len,
            checksum,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_round_trip() {
        let header = JournalHeader::new();
        let bytes = header.to_bytes();
        let restored = JournalHeader::from_bytes(&bytes).unwrap();
        assert_eq!(header, restored);
    }

    #[test]
    fn header_rejects_invalid_magic() {
        let mut bytes = JournalHeader::new().to_bytes();
        bytes[0] = b'X';
        assert!(JournalHeader::from_bytes(&bytes).is_err());
    }

    #[test]
    fn header_rejects_invalid_version() {
        let mut bytes = JournalHeader::new().to_bytes();
        bytes[4] = 0x02;
        bytes[5] = 0x00;
        let err = JournalHeader::from_bytes(&bytes).unwrap_err();
        assert!(err.to_string().contains("version"));
    }

    #[test]
    fn header_rejects_non_zero_flags() {
        let mut bytes = JournalHeader::new().to_bytes();
        bytes[6] = 0x01;
        assert!(JournalHeader::from_bytes(&bytes).is_err());
    }

    #[test]
    fn header_rejects_non_zero_reserved() {
        let mut bytes = JournalHeader::new().to_bytes();
        bytes[8] = 0x01;
        assert!(JournalHeader::from_bytes(&bytes).is_err());
    }

    #[test]
    fn frame_round_trip() {
        let frame = RecordFrame::for_payload(FrameKind::EntryJson, b"payload").unwrap();
        let bytes = frame.to_bytes();
        let restored = RecordFrame::from_bytes(&bytes).unwrap();
        assert_eq!(frame, restored);
        assert!(restored.verify_payload(b"payload"));
    }

    #[test]
    fn checksum_catches_payload_edit() {
        let frame = RecordFrame::for_payload(FrameKind::EntryJson, b"payload").unwrap();
        assert!(!frame.verify_payload(b"pa1load"));
        assert!(!frame.verify_payload(b"payload-and-more"));
    }

    #[test]
    fn checksum_is_stable() {
        assert_eq!(payload_checksum(b"abc"), payload_checksum(b"abc"));
        assert_ne!(payload_checksum(b"abc"), payload_checksum(b"abd"));
    }

    #[test]
    fn frame_rejects_oversized_payload() {
        let payload = vec![0u8; MAX_PAYLOAD_SIZE as usize + 1];
        assert!(RecordFrame::for_payload(FrameKind::EntryJson, &payload).is_err());
    }

    #[test]
    fn frame_rejects_non_zero_reserved() {
        let mut bytes = RecordFrame::for_payload(FrameKind::EntryJson, b"x")
            .unwrap()
            .to_bytes();
        bytes[1] = 0x01;
        assert!(RecordFrame::from_bytes(&bytes).is_err());
    }

    #[test]
    fn frame_kind_unknown_round_trips() {
        let kind = FrameKind::from_byte(0xFF);
        assert_eq!(kind.to_byte(), 0xFF);
    }
}
