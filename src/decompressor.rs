use crate::command::{Command, Mode};
use crate::error::{Lz2Error, Result};
use crate::header::Header;
use crate::piece::Piece;
use log::debug;

/// LC-LZ2 decompressor.
///
/// Reads a header, then the argument it calls for, then emits the piece's
/// bytes, and loops until the terminator. Every read is bounds checked, so
/// corrupt input fails with an error instead of panicking.
///
/// # Example
///
/// ```
/// use lc_lz2::{Decompressor, Mode};
///
/// let stream = [0x22, 0x2A, 0x01, 0x07, 0x09, 0xFF];
/// let mut decompressor = Decompressor::new(&stream, 0, Mode::default());
/// assert_eq!(decompressor.decompress(5).unwrap(), vec![0x2A, 0x2A, 0x2A, 0x07, 0x09]);
/// assert_eq!(decompressor.position(), stream.len());
/// ```
#[derive(Debug, Clone)]
pub struct Decompressor<'a> {
    data: &'a [u8],
    pos: usize,
    mode: Mode,
}

impl<'a> Decompressor<'a> {
    /// Prepares to read the unit starting at `data[start]`.
    pub fn new(data: &'a [u8], start: usize, mode: Mode) -> Self {
        Self {
            data,
            pos: start,
            mode,
        }
    }

    /// Offset of the next unread byte. After a full decode this is one past
    /// the terminator.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Decodes the unit into exactly `expected` bytes.
    ///
    /// A stream that ends early is zero-filled up to `expected`; one that
    /// expands past it fails with [`Lz2Error::OutputOverflow`].
    pub fn decompress(&mut self, expected: usize) -> Result<Vec<u8>> {
        if expected == 0 {
            return Ok(Vec::new());
        }

        let start = self.pos;
        let mut output = Vec::with_capacity(expected);
        while let Some(piece) = self.read_piece()? {
            let actual = output.len() + piece.length;
            if actual > expected {
                return Err(Lz2Error::OutputOverflow { expected, actual });
            }
            emit(&piece, &mut output)?;
        }

        debug!(
            "decompressed {} bytes from {:#x} into {} bytes",
            self.pos - start,
            start,
            output.len()
        );
        output.resize(expected, 0);
        Ok(output)
    }

    /// Reads the next piece, or `None` once the terminator is consumed.
    pub fn read_piece(&mut self) -> Result<Option<Piece>> {
        let (header, used) = match Header::decode(self.data, self.pos)? {
            Some(decoded) => decoded,
            None => {
                self.pos += 1;
                return Ok(None);
            }
        };
        self.pos += used;

        let piece = match header.command {
            Command::DirectCopy => Piece::direct_copy(self.take(header.length)?),
            Command::ByteFill => Piece::byte_fill(self.take(1)?[0], header.length),
            Command::WordFill => {
                let pair = self.take(2)?;
                Piece::word_fill([pair[0], pair[1]], header.length)
            }
            Command::IncreasingFill => Piece::increasing_fill(self.take(1)?[0], header.length),
            Command::RepeatingBytes => {
                let bytes = self.take(2)?;
                let offset = self.mode.decode_offset([bytes[0], bytes[1]]);
                Piece::repeating_bytes(offset, header.length)
            }
        };
        Ok(Some(piece))
    }

    /// Decodes the remaining pieces without expanding them.
    pub fn pieces(&mut self) -> Result<Vec<Piece>> {
        let mut pieces = Vec::new();
        while let Some(piece) = self.read_piece()? {
            pieces.push(piece);
        }
        Ok(pieces)
    }

    fn take(&mut self, count: usize) -> Result<&'a [u8]> {
        let end = self.pos + count;
        let bytes = self
            .data
            .get(self.pos..end)
            .ok_or(Lz2Error::TruncatedStream {
                offset: self.data.len().max(self.pos),
            })?;
        self.pos = end;
        Ok(bytes)
    }
}

/// Appends the bytes `piece` expands to.
///
/// Back-references copy one byte at a time: the source range may overlap the
/// bytes being written, which is how a short pattern repeats into a long run.
pub(crate) fn emit(piece: &Piece, output: &mut Vec<u8>) -> Result<()> {
    match piece.command {
        Command::DirectCopy => output.extend_from_slice(&piece.argument),
        Command::ByteFill => output.resize(output.len() + piece.length, piece.argument[0]),
        Command::WordFill => {
            let pair = [piece.argument[0], piece.argument[1]];
            output.extend((0..piece.length).map(|i| pair[i % 2]));
        }
        Command::IncreasingFill => {
            let seed = piece.argument[0];
            output.extend((0..piece.length).map(|i| seed.wrapping_add(i as u8)));
        }
        Command::RepeatingBytes => {
            let offset = usize::from(piece.offset()?);
            if offset >= output.len() {
                return Err(Lz2Error::InvalidBackReference {
                    offset,
                    available: output.len(),
                });
            }
            for i in 0..piece.length {
                let byte = output[offset + i];
                output.push(byte);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(stream: &[u8], expected: usize) -> Result<Vec<u8>> {
        Decompressor::new(stream, 0, Mode::default()).decompress(expected)
    }

    #[test]
    fn test_empty() {
        assert_eq!(decode(&[], 0).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_direct_copy() {
        assert_eq!(decode(&[0x01, 0x2A, 0x45, 0xFF], 2).unwrap(), vec![0x2A, 0x45]);
    }

    #[test]
    fn test_mixing_commands() {
        let stream = [0x22, 0x2A, 0x03, 0x01, 0x02, 0x03, 0x04, 0x41, 0x0B, 0x16, 0xFF];
        assert_eq!(
            decode(&stream, 9).unwrap(),
            vec![42, 42, 42, 1, 2, 3, 4, 11, 22]
        );
    }

    #[test]
    fn test_word_fill_odd_length() {
        assert_eq!(decode(&[0x44, 0x05, 0x06, 0xFF], 5).unwrap(), vec![5, 6, 5, 6, 5]);
    }

    #[test]
    fn test_increasing_fill_wraps() {
        assert_eq!(decode(&[0x63, 0xFE, 0xFF], 4).unwrap(), vec![0xFE, 0xFF, 0x00, 0x01]);
    }

    #[test]
    fn test_overlapping_back_reference() {
        // Two literals, then ten bytes copied from offset 0 while being written.
        let stream = [0x01, 0xA1, 0xB2, 0x89, 0x00, 0x00, 0xFF];
        assert_eq!(
            decode(&stream, 12).unwrap(),
            vec![0xA1, 0xB2, 0xA1, 0xB2, 0xA1, 0xB2, 0xA1, 0xB2, 0xA1, 0xB2, 0xA1, 0xB2]
        );
    }

    #[test]
    fn test_back_reference_byte_order() {
        let literals: Vec<u8> = (0..=0x0Au8).collect();
        let mut stream = vec![0x0A];
        stream.extend_from_slice(&literals);
        stream.extend_from_slice(&[0x81, 0x00, 0x08, 0xFF]);

        let little = Decompressor::new(&stream, 0, Mode::LittleEndian).decompress(13);
        assert_eq!(
            little,
            Err(Lz2Error::InvalidBackReference {
                offset: 0x0800,
                available: 11
            })
        );

        let big = Decompressor::new(&stream, 0, Mode::BigEndian)
            .decompress(13)
            .unwrap();
        assert_eq!(&big[11..], &[0x08, 0x09]);
    }

    #[test]
    fn test_short_stream_zero_filled() {
        assert_eq!(decode(&[0x01, 0x2A, 0x45, 0xFF], 4).unwrap(), vec![0x2A, 0x45, 0, 0]);
    }

    #[test]
    fn test_overflow() {
        assert_eq!(
            decode(&[0x24, 0x2A, 0xFF], 3),
            Err(Lz2Error::OutputOverflow {
                expected: 3,
                actual: 5
            })
        );
    }

    #[test]
    fn test_truncated_streams() {
        // Missing terminator
        assert_eq!(
            decode(&[0x22, 0x2A], 3),
            Err(Lz2Error::TruncatedStream { offset: 2 })
        );
        // Argument cut short
        assert_eq!(
            decode(&[0x03, 0x01, 0x02], 4),
            Err(Lz2Error::TruncatedStream { offset: 3 })
        );
        // Extended header missing its second byte
        assert_eq!(
            decode(&[0xE4], 40),
            Err(Lz2Error::TruncatedStream { offset: 1 })
        );
    }

    #[test]
    fn test_malformed_header() {
        assert_eq!(
            decode(&[0x22, 0x00, 0xC0, 0xFF], 8),
            Err(Lz2Error::MalformedHeader {
                offset: 2,
                header: 0xC0
            })
        );
    }

    #[test]
    fn test_back_reference_into_future() {
        assert_eq!(
            decode(&[0x82, 0x00, 0x00, 0xFF], 3),
            Err(Lz2Error::InvalidBackReference {
                offset: 0,
                available: 0
            })
        );
    }

    #[test]
    fn test_start_offset_and_position() {
        let rom = [0xAB, 0xCD, 0x22, 0x07, 0xFF, 0x99];
        let mut decompressor = Decompressor::new(&rom, 2, Mode::default());
        assert_eq!(decompressor.decompress(3).unwrap(), vec![7, 7, 7]);
        assert_eq!(decompressor.position(), 5);
    }

    #[test]
    fn test_pieces() {
        let stream = [0x22, 0x2A, 0x83, 0x00, 0x00, 0xFF];
        let pieces = Decompressor::new(&stream, 0, Mode::default())
            .pieces()
            .unwrap();
        assert_eq!(
            pieces,
            vec![Piece::byte_fill(0x2A, 3), Piece::repeating_bytes(0, 4)]
        );
    }
}
