//! Piece headers.
//!
//! ```text
//! normal:   CCCLLLLL                 length 1..=32
//! extended: 111CCCLL LLLLLLLL        length 1..=1024
//! ```
//!
//! `L` holds `length - 1`. A first byte of `0xFF` is the terminator.

use crate::command::{
    Command, EXTENDED_PREFIX, MAX_NORMAL_LENGTH, MAX_PIECE_LENGTH, TERMINATOR,
};
use crate::error::{Lz2Error, Result};

/// A decoded or to-be-encoded piece header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub command: Command,
    /// Output bytes the piece expands to.
    pub length: usize,
}

impl Header {
    pub fn new(command: Command, length: usize) -> Self {
        Self { command, length }
    }

    /// Whether this header needs the two-byte form.
    pub fn is_extended(&self) -> bool {
        self.length > MAX_NORMAL_LENGTH
    }

    /// Number of bytes [`Header::encode`] writes.
    pub fn encoded_len(&self) -> usize {
        if self.is_extended() {
            2
        } else {
            1
        }
    }

    /// Appends the header bytes to `out`.
    pub fn encode(&self, out: &mut Vec<u8>) -> Result<()> {
        if self.length == 0 || self.length > MAX_PIECE_LENGTH {
            return Err(Lz2Error::InvalidPieceLength {
                length: self.length,
            });
        }

        let stored = self.length - 1;
        let command = self.command.tag();
        if self.is_extended() {
            out.push(EXTENDED_PREFIX | (command << 2) | (stored >> 8) as u8);
            out.push((stored & 0xFF) as u8);
        } else {
            out.push((command << 5) | stored as u8);
        }
        Ok(())
    }

    /// Reads the header starting at `data[offset]`.
    ///
    /// Returns `None` on the terminator, otherwise the header and the number
    /// of header bytes consumed.
    pub fn decode(data: &[u8], offset: usize) -> Result<Option<(Header, usize)>> {
        let first = *data
            .get(offset)
            .ok_or(Lz2Error::TruncatedStream { offset })?;
        if first == TERMINATOR {
            return Ok(None);
        }

        if first & EXTENDED_PREFIX == EXTENDED_PREFIX {
            let second = *data
                .get(offset + 1)
                .ok_or(Lz2Error::TruncatedStream { offset: offset + 1 })?;
            let command = Self::command_from(first, (first >> 2) & 0x07, offset)?;
            let length = ((usize::from(first & 0x03) << 8) | usize::from(second)) + 1;
            Ok(Some((Header::new(command, length), 2)))
        } else {
            let command = Self::command_from(first, first >> 5, offset)?;
            let length = usize::from(first & 0x1F) + 1;
            Ok(Some((Header::new(command, length), 1)))
        }
    }

    fn command_from(header: u8, tag: u8, offset: usize) -> Result<Command> {
        Command::try_from(tag).map_err(|_| Lz2Error::MalformedHeader { offset, header })
    }
}
