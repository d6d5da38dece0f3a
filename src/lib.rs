//! # LC-LZ2 - SNES Graphics Compression
//!
//! A bit-exact implementation of the LC-LZ2 format used to pack graphics
//! sheets and map data inside SNES ROM images.
//!
//! A compressed unit is a sequence of pieces, each a header followed by an
//! argument, ended by a `0xFF` terminator. There are five commands:
//! 1. **DirectCopy**: literal bytes
//! 2. **ByteFill**: one byte repeated
//! 3. **WordFill**: two bytes alternated
//! 4. **IncreasingFill**: a byte counting upwards
//! 5. **RepeatingBytes**: a copy of output already produced by the unit
//!
//! ## Example
//!
//! ```
//! use lc_lz2::{compress, decompress, Mode};
//!
//! let tiles = [0x00, 0x00, 0x00, 0x00, 0x10, 0x11, 0x12, 0x13];
//! let packed = compress(&tiles, 0, tiles.len(), Mode::GRAPHICS).unwrap();
//! assert_eq!(packed, vec![0x23, 0x00, 0x63, 0x10, 0xFF]);
//!
//! let unpacked = decompress(&packed, 0, tiles.len(), Mode::GRAPHICS).unwrap();
//! assert_eq!(unpacked, tiles);
//! ```
//!
//! ## Pipeline
//!
//! Compression builds a [`PieceChain`] with a greedy left-to-right scan,
//! splits pieces longer than 1024 bytes, merges adjacent literal pieces and
//! serializes the result. Decompression is an independent state machine over
//! the byte stream.

mod chain;
mod command;
mod compressor;
mod decompressor;
mod error;
mod header;
mod heuristics;
mod iter;
mod merge;
mod piece;
mod serializer;
mod split;
mod validator;


pub use chain::{ChainStats, PieceChain};
pub use command::{Command, Mode, MAX_NORMAL_LENGTH, MAX_PIECE_LENGTH, TERMINATOR};
pub use compressor::{CompressOptions, Compressor};
pub use decompressor::Decompressor;
pub use error::{Lz2Error, Result};
pub use header::Header;
pub use iter::ChainIter;
pub use piece::Piece;
pub use serializer::{serialize, write_piece};
pub use validator::validate_round_trip;

/// Compresses `source[start..start + length]` into a complete LC-LZ2 stream.
pub fn compress(source: &[u8], start: usize, length: usize, mode: Mode) -> Result<Vec<u8>> {
    Compressor::new(CompressOptions::new(mode)).compress(source, start, length)
}

/// Decompresses the unit at `source[start..]` into exactly
/// `expected_output_size` bytes.
pub fn decompress(
    source: &[u8],
    start: usize,
    expected_output_size: usize,
    mode: Mode,
) -> Result<Vec<u8>> {
    Decompressor::new(source, start, mode).decompress(expected_output_size)
}

/// Compresses graphics data (offsets low byte first).
pub fn compress_graphics(source: &[u8], start: usize, length: usize) -> Result<Vec<u8>> {
    compress(source, start, length, Mode::GRAPHICS)
}

/// Compresses overworld map data (offsets high byte first).
pub fn compress_overworld(source: &[u8], start: usize, length: usize) -> Result<Vec<u8>> {
    compress(source, start, length, Mode::OVERWORLD)
}

/// Decompresses graphics data (offsets low byte first).
pub fn decompress_graphics(source: &[u8], start: usize, size: usize) -> Result<Vec<u8>> {
    decompress(source, start, size, Mode::GRAPHICS)
}

/// Decompresses overworld map data (offsets high byte first).
pub fn decompress_overworld(source: &[u8], start: usize, size: usize) -> Result<Vec<u8>> {
    decompress(source, start, size, Mode::OVERWORLD)
}
