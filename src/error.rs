//! Error types for the LC-LZ2 codec.

use thiserror::Error;

/// Errors produced while compressing, decompressing or validating a unit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Lz2Error {
    /// A command tag outside the five LC-LZ2 commands, or a piece whose
    /// argument does not have the shape its command requires.
    #[error("invalid command: {command:#04x}")]
    InvalidCommand { command: u8 },

    /// Decompressing freshly compressed data did not reproduce the source.
    #[error("round trip mismatch at offset {offset}")]
    RoundTripMismatch { offset: usize },

    /// The stream ended before the terminator was reached.
    #[error("truncated stream at offset {offset:#06x}")]
    TruncatedStream { offset: usize },

    /// A header byte that does not decode to a known command.
    #[error("malformed header {header:#04x} at offset {offset:#06x}")]
    MalformedHeader { offset: usize, header: u8 },

    /// A back-reference pointing at output that has not been produced yet.
    #[error("back-reference to {offset:#06x} with only {available} bytes decoded")]
    InvalidBackReference { offset: usize, available: usize },

    /// The stream expands past the size the caller expected.
    #[error("output overflow: expected {expected} bytes, stream produced {actual}")]
    OutputOverflow { expected: usize, actual: usize },

    /// A piece length no header can describe (zero, or past the 1024 byte ceiling).
    #[error("piece length {length} outside 1..=1024")]
    InvalidPieceLength { length: usize },

    /// The requested region does not lie inside the source buffer.
    #[error("region {start}+{length} is outside a {available} byte buffer")]
    RegionOutOfBounds {
        start: usize,
        length: usize,
        available: usize,
    },
}

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, Lz2Error>;
