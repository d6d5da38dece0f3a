use crate::chain::PieceChain;
use crate::command::{Command, Mode, TERMINATOR};
use crate::error::Result;
use crate::header::Header;
use crate::piece::Piece;

/// Turns a split and merged chain into the final byte stream.
///
/// Each piece becomes a header followed by its argument; the stream ends
/// with a single `0xFF`. Only RepeatingBytes offsets depend on `mode`.
pub fn serialize(chain: &PieceChain, mode: Mode) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(chain.stats().encoded_len);
    for piece in chain {
        write_piece(&mut out, piece, mode)?;
    }
    out.push(TERMINATOR);
    Ok(out)
}

/// Appends one piece, header and argument.
pub fn write_piece(out: &mut Vec<u8>, piece: &Piece, mode: Mode) -> Result<()> {
    piece.check_argument()?;
    Header::new(piece.command, piece.length).encode(out)?;
    match piece.command {
        Command::RepeatingBytes => out.extend_from_slice(&mode.encode_offset(piece.offset()?)),
        _ => out.extend_from_slice(&piece.argument),
    }
    Ok(())
}
