use crate::chain::PieceChain;
use crate::command::{Command, MAX_PIECE_LENGTH};
use log::trace;

impl PieceChain {
    /// Coalesces runs of adjacent DirectCopy pieces while the combined
    /// length stays within 1024 bytes.
    pub fn merge(mut self) -> Self {
        self.merge_in_place();
        self
    }

    /// In-place form of [`PieceChain::merge`].
    pub fn merge_in_place(&mut self) {
        let mut current = self.head;
        while let Some(key) = current {
            let node = &self.pieces[key];
            let mergeable = node.next.is_some_and(|next| {
                let next = &self.pieces[next].piece;
                node.piece.command == Command::DirectCopy
                    && next.command == Command::DirectCopy
                    && node.piece.length + next.length <= MAX_PIECE_LENGTH
            });

            if !mergeable {
                current = node.next;
                continue;
            }

            // Stay on this piece: it may absorb the copy after the one just merged.
            if let Some(next) = self.remove_after(key) {
                let piece = &mut self.pieces[key].piece;
                piece.length += next.length;
                piece.argument.extend_from_slice(&next.argument);
                trace!("merged copy into {piece}");
            }
        }
    }
}
