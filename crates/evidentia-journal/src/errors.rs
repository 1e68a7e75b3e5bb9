use thiserror::Error;

/// Errors that can occur during journal operations.
#[derive(Error, Debug)]
pub enum JournalError {
    /// I/O error during read or write.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Invalid file header (magic, version, or flags).
    #[error("invalid journal header: {0}")]
    InvalidHeader(String),
    /// Invalid frame structure (kind, reserved bytes, or length).
    #[error("invalid frame at offset {offset}: {reason}")]
    InvalidFrame {
        /// Byte offset where the frame starts.
        offset: u64,
        /// Reason for invalidity.
        reason: String,
    },
    /// Payload exceeds maximum size limit.
    #[error("payload size {size} exceeds maximum {max}")]
    PayloadTooLarge {
        /// Actual payload size.
        size: u32,
        /// Maximum allowed size.
        max: u32,
    },
    /// Invalid UTF-8 in entry payload.
    #[error("invalid UTF-8 in entry payload: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    /// Invalid JSON in entry payload (from serde_json).
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
    /// Structurally invalid entry JSON.
    #[error("invalid entry JSON: {0}")]
    InvalidEntry(String),
    /// Attempted to write to a non-empty file without proper initialization.
    #[error("file is not empty; cannot initialize header")]
    FileNotEmpty,
    /// Frame payload does not match the checksum recorded in its header.
    #[error("payload checksum mismatch at offset {offset}")]
    ChecksumMismatch {
        /// Byte offset where the frame starts.
        offset: u64,
    },
    /// Truncated frame detected in strict mode.
    #[error("truncated frame at offset {offset}")]
    TruncatedFrame {
        /// Byte offset where truncation occurred.
        offset: u64,
    },
    /// Broken prev-hash chain detected during verification.
    #[error("broken hash chain at entry {entry_id}: {reason}")]
    BrokenChain {
        /// Id of the entry where the chain breaks.
        entry_id: u64,
        /// Reason for the break.
        reason: String,
    },
}
