use crate::chain::PieceChain;
use crate::command::{Command, MAX_PIECE_LENGTH};
use crate::error::Result;
use crate::piece::Piece;
use log::trace;

impl PieceChain {
    /// Rewrites every piece longer than 1024 bytes into a 1024 byte piece
    /// followed by the remainder.
    pub fn split(mut self) -> Result<Self> {
        self.split_in_place()?;
        Ok(self)
    }

    /// In-place form of [`PieceChain::split`].
    ///
    /// The remainder is inserted right after the truncated piece and is
    /// visited next, so a remainder that is still too long is split again.
    pub fn split_in_place(&mut self) -> Result<()> {
        let mut current = self.head;
        while let Some(key) = current {
            if self.pieces[key].piece.length > MAX_PIECE_LENGTH {
                let remainder = split_piece(&mut self.pieces[key].piece)?;
                trace!("split off {remainder}");
                self.insert_after(key, remainder);
            }
            current = self.pieces[key].next;
        }
        Ok(())
    }
}

/// Truncates `piece` to 1024 bytes and returns the piece covering the rest.
pub(crate) fn split_piece(piece: &mut Piece) -> Result<Piece> {
    piece.check_argument()?;

    let length_left = piece.length - MAX_PIECE_LENGTH;
    let remainder = match piece.command {
        Command::ByteFill | Command::WordFill => {
            Piece::new(piece.command, length_left, piece.argument.clone())
        }
        Command::IncreasingFill => {
            let seed = piece.argument[0].wrapping_add((MAX_PIECE_LENGTH % 256) as u8);
            Piece::increasing_fill(seed, length_left)
        }
        Command::DirectCopy => {
            let tail = piece.argument.split_off(MAX_PIECE_LENGTH);
            Piece::new(Command::DirectCopy, length_left, tail)
        }
        Command::RepeatingBytes => {
            let offset = piece.offset()?;
            let advanced = u16::try_from(usize::from(offset) + MAX_PIECE_LENGTH)
                .map_err(|_| piece.invalid())?;
            Piece::repeating_bytes(advanced, length_left)
        }
    };

    piece.length = MAX_PIECE_LENGTH;
    Ok(remainder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Lz2Error;

    fn lengths(chain: &PieceChain) -> Vec<usize> {
        chain.iter().map(|p| p.length).collect()
    }

    #[test]
    fn test_short_pieces_untouched() {
        let chain: PieceChain = vec![Piece::byte_fill(5, 1024), Piece::direct_copy(&[1, 2])]
            .into_iter()
            .collect();
        let chain = chain.split().unwrap();
        assert_eq!(lengths(&chain), vec![1024, 2]);
    }

    #[test]
    fn test_byte_fill_boundary() {
        let chain: PieceChain = std::iter::once(Piece::byte_fill(5, 1050)).collect();
        let chain = chain.split().unwrap();
        assert_eq!(
            chain.to_vec(),
            vec![Piece::byte_fill(5, 1024), Piece::byte_fill(5, 26)]
        );
    }

    #[test]
    fn test_recursive_split() {
        let chain: PieceChain = vec![Piece::word_fill([5, 6], 3000), Piece::byte_fill(1, 4)]
            .into_iter()
            .collect();
        let chain = chain.split().unwrap();
        assert_eq!(lengths(&chain), vec![1024, 1024, 952, 4]);
        assert!(chain.iter().take(3).all(|p| p.argument == vec![5, 6]));
        assert_eq!(chain.output_len(), 3004);
    }

    #[test]
    fn test_increasing_fill_seed_advances() {
        let mut piece = Piece::increasing_fill(0x10, 1100);
        let remainder = split_piece(&mut piece).unwrap();
        assert_eq!(piece.length, 1024);
        assert_eq!(remainder, Piece::increasing_fill(0x10, 76));
    }

    #[test]
    fn test_direct_copy_takes_tail() {
        let bytes: Vec<u8> = (0..1030u32).map(|i| (i * 7) as u8).collect();
        let mut piece = Piece::direct_copy(&bytes);
        let remainder = split_piece(&mut piece).unwrap();
        assert_eq!(piece.argument, bytes[..1024].to_vec());
        assert_eq!(remainder, Piece::direct_copy(&bytes[1024..]));
    }

    #[test]
    fn test_repeating_bytes_offset_advances() {
        let mut piece = Piece::repeating_bytes(0x0010, 2000);
        let remainder = split_piece(&mut piece).unwrap();
        assert_eq!(piece.offset(), Ok(0x0010));
        assert_eq!(remainder, Piece::repeating_bytes(0x0410, 976));
    }

    #[test]
    fn test_malformed_piece_rejected() {
        let chain: PieceChain =
            std::iter::once(Piece::new(Command::RepeatingBytes, 2000, vec![1])).collect();
        assert_eq!(
            chain.split().unwrap_err(),
            Lz2Error::InvalidCommand { command: 4 }
        );
    }
}
