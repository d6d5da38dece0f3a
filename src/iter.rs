use crate::chain::PieceChain;
use crate::piece::Piece;
use slotmap::DefaultKey;

/// Iterator over the pieces of a chain, head to tail.
pub struct ChainIter<'a> {
    chain: &'a PieceChain,
    current: Option<DefaultKey>,
}

impl<'a> Iterator for ChainIter<'a> {
    type Item = &'a Piece;

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.current?;
        let node = &self.chain.pieces[key];
        self.current = node.next;
        Some(&node.piece)
    }
}

impl PieceChain {
    /// Returns an iterator over the pieces in chain order.
    pub fn iter(&self) -> ChainIter<'_> {
        ChainIter {
            chain: self,
            current: self.head,
        }
    }
}

impl<'a> IntoIterator for &'a PieceChain {
    type Item = &'a Piece;
    type IntoIter = ChainIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
