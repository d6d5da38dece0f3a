use crate::command::Command;
use crate::error::{Lz2Error, Result};
use slotmap::DefaultKey;
use std::fmt;

/// One encoded command of the intermediate representation.
///
/// `argument` holds the raw literal bytes for DirectCopy, the seed byte for
/// ByteFill and IncreasingFill, and the byte pair for WordFill. A
/// RepeatingBytes offset is always stored low byte first; the wire order is
/// only chosen when the piece is serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub command: Command,
    /// Output bytes this piece expands to.
    pub length: usize,
    pub argument: Vec<u8>,
}

impl Piece {
    pub fn new(command: Command, length: usize, argument: Vec<u8>) -> Self {
        Self {
            command,
            length,
            argument,
        }
    }

    /// Builds a piece from a raw command tag.
    pub fn from_raw(tag: u8, length: usize, argument: Vec<u8>) -> Result<Self> {
        Ok(Self::new(Command::try_from(tag)?, length, argument))
    }

    pub fn direct_copy(bytes: &[u8]) -> Self {
        Self::new(Command::DirectCopy, bytes.len(), bytes.to_vec())
    }

    pub fn byte_fill(byte: u8, length: usize) -> Self {
        Self::new(Command::ByteFill, length, vec![byte])
    }

    pub fn word_fill(pair: [u8; 2], length: usize) -> Self {
        Self::new(Command::WordFill, length, pair.to_vec())
    }

    pub fn increasing_fill(seed: u8, length: usize) -> Self {
        Self::new(Command::IncreasingFill, length, vec![seed])
    }

    pub fn repeating_bytes(offset: u16, length: usize) -> Self {
        Self::new(Command::RepeatingBytes, length, offset.to_le_bytes().to_vec())
    }

    /// The back-reference offset of a RepeatingBytes piece.
    pub fn offset(&self) -> Result<u16> {
        match (self.command, self.argument.as_slice()) {
            (Command::RepeatingBytes, &[low, high]) => Ok(u16::from_le_bytes([low, high])),
            _ => Err(self.invalid()),
        }
    }

    /// Checks that the argument has the shape the command requires.
    pub fn check_argument(&self) -> Result<()> {
        let expected = self.command.argument_size().unwrap_or(self.length);
        if self.argument.len() == expected {
            Ok(())
        } else {
            Err(self.invalid())
        }
    }

    pub(crate) fn invalid(&self) -> Lz2Error {
        Lz2Error::InvalidCommand {
            command: self.command.tag(),
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x{} [", self.command, self.length)?;
        for (i, byte) in self.argument.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{byte:02X}")?;
        }
        f.write_str("]")
    }
}

/// A node in the singly linked piece chain.
#[derive(Debug)]
pub(crate) struct PieceNode {
    pub piece: Piece,
    pub next: Option<DefaultKey>,
}

impl PieceNode {
    pub(crate) fn new(piece: Piece) -> Self {
        Self { piece, next: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw() {
        let piece = Piece::from_raw(0x01, 0x01, b"aa".to_vec()).unwrap();
        assert_eq!(piece.command, Command::ByteFill);
        assert_eq!(piece.length, 1);
        assert_eq!(piece.argument, b"aa".to_vec());

        assert_eq!(
            Piece::from_raw(0x06, 1, vec![0]),
            Err(Lz2Error::InvalidCommand { command: 0x06 })
        );
    }

    #[test]
    fn test_offset_storage_is_low_first() {
        let piece = Piece::repeating_bytes(0x0201, 8);
        assert_eq!(piece.argument, vec![0x01, 0x02]);
        assert_eq!(piece.offset(), Ok(0x0201));
        assert!(Piece::byte_fill(0, 4).offset().is_err());
    }

    #[test]
    fn test_check_argument() {
        assert!(Piece::direct_copy(&[1, 2, 3]).check_argument().is_ok());
        assert!(Piece::word_fill([1, 2], 6).check_argument().is_ok());
        assert!(Piece::new(Command::DirectCopy, 4, vec![1]).check_argument().is_err());
        assert!(Piece::new(Command::IncreasingFill, 4, vec![]).check_argument().is_err());
    }

    #[test]
    fn test_display() {
        let piece = Piece::word_fill([0x2A, 0x01], 6);
        assert_eq!(piece.to_string(), "WordFill x6 [2A 01]");
    }
}
