//! Command tags, offset byte order and the format's fixed limits.

use crate::error::Lz2Error;
use std::fmt;

/// Largest piece a one-byte header can describe.
pub const MAX_NORMAL_LENGTH: usize = 32;

/// Largest piece an extended header can describe.
pub const MAX_PIECE_LENGTH: usize = 1024;

/// Byte ending every compressed unit.
pub const TERMINATOR: u8 = 0xFF;

/// Top three header bits marking an extended header.
pub(crate) const EXTENDED_PREFIX: u8 = 0b1110_0000;

/// The five LC-LZ2 commands, tagged with their on-wire value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Command {
    /// Literal bytes copied straight from the stream.
    DirectCopy = 0,
    /// One byte repeated.
    ByteFill = 1,
    /// Two bytes alternated.
    WordFill = 2,
    /// A seed byte counting upwards, wrapping at 256.
    IncreasingFill = 3,
    /// Bytes copied from earlier output of the same unit.
    RepeatingBytes = 4,
}

impl Command {
    /// All commands in tag order.
    pub const ALL: [Command; 5] = [
        Command::DirectCopy,
        Command::ByteFill,
        Command::WordFill,
        Command::IncreasingFill,
        Command::RepeatingBytes,
    ];

    /// The on-wire tag.
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Index into per-command tables.
    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Argument bytes stored after the header, or `None` for DirectCopy whose
    /// argument is as long as the piece itself.
    pub fn argument_size(self) -> Option<usize> {
        match self {
            Command::DirectCopy => None,
            Command::ByteFill | Command::IncreasingFill => Some(1),
            Command::WordFill | Command::RepeatingBytes => Some(2),
        }
    }
}

impl TryFrom<u8> for Command {
    type Error = Lz2Error;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(Command::DirectCopy),
            1 => Ok(Command::ByteFill),
            2 => Ok(Command::WordFill),
            3 => Ok(Command::IncreasingFill),
            4 => Ok(Command::RepeatingBytes),
            _ => Err(Lz2Error::InvalidCommand { command: tag }),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Command::DirectCopy => "DirectCopy",
            Command::ByteFill => "ByteFill",
            Command::WordFill => "WordFill",
            Command::IncreasingFill => "IncreasingFill",
            Command::RepeatingBytes => "RepeatingBytes",
        };
        f.write_str(name)
    }
}

/// Byte order of the RepeatingBytes back-reference offset on the wire.
///
/// The game's own decompressors disagree: graphics sheets store the offset
/// low byte first, overworld maps high byte first. The mode must match the
/// data being replaced; it is never inferred from content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Low byte, then high byte.
    #[default]
    LittleEndian,
    /// High byte, then low byte.
    BigEndian,
}

impl Mode {
    /// Order used by graphics sheets.
    pub const GRAPHICS: Mode = Mode::LittleEndian;
    /// Order used by overworld map data.
    pub const OVERWORLD: Mode = Mode::BigEndian;

    /// Writes `offset` in this mode's byte order.
    pub fn encode_offset(self, offset: u16) -> [u8; 2] {
        match self {
            Mode::LittleEndian => offset.to_le_bytes(),
            Mode::BigEndian => offset.to_be_bytes(),
        }
    }

    /// Reads an offset stored in this mode's byte order.
    pub fn decode_offset(self, bytes: [u8; 2]) -> u16 {
        match self {
            Mode::LittleEndian => u16::from_le_bytes(bytes),
            Mode::BigEndian => u16::from_be_bytes(bytes),
        }
    }
}
