use crate::command::Command;
use crate::header::Header;
use crate::piece::{Piece, PieceNode};
use slotmap::{DefaultKey, SlotMap};

/// Ordered sequence of pieces produced by the compressor.
///
/// Pieces live in a slotmap arena and link forward through generational
/// keys, so the splitter can insert after a node and the merger can unlink
/// one without any shared ownership.
#[derive(Debug, Default)]
pub struct PieceChain {
    /// Storage for all live pieces
    pub(crate) pieces: SlotMap<DefaultKey, PieceNode>,

    /// First piece, if any
    pub(crate) head: Option<DefaultKey>,

    /// Last piece, kept so appends are O(1)
    pub(crate) tail: Option<DefaultKey>,
}

impl PieceChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a piece at the end of the chain.
    pub fn push(&mut self, piece: Piece) -> DefaultKey {
        let key = self.pieces.insert(PieceNode::new(piece));
        match self.tail {
            Some(tail) => self.pieces[tail].next = Some(key),
            None => self.head = Some(key),
        }
        self.tail = Some(key);
        key
    }

    /// Links `piece` directly after `key`.
    pub(crate) fn insert_after(&mut self, key: DefaultKey, piece: Piece) -> DefaultKey {
        let new_key = self.pieces.insert(PieceNode::new(piece));
        let after = self.pieces[key].next;
        self.pieces[new_key].next = after;
        self.pieces[key].next = Some(new_key);
        if self.tail == Some(key) {
            self.tail = Some(new_key);
        }
        new_key
    }

    /// Unlinks and returns the successor of `key`.
    pub(crate) fn remove_after(&mut self, key: DefaultKey) -> Option<Piece> {
        let next = self.pieces[key].next?;
        let node = self.pieces.remove(next)?;
        self.pieces[key].next = node.next;
        if self.tail == Some(next) {
            self.tail = Some(key);
        }
        Some(node.piece)
    }

    /// Number of pieces in the chain.
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Total bytes the chain expands to.
    pub fn output_len(&self) -> usize {
        self.iter().map(|piece| piece.length).sum()
    }

    /// Copies the pieces out in chain order.
    pub fn to_vec(&self) -> Vec<Piece> {
        self.iter().cloned().collect()
    }

    /// Returns statistics about the chain.
    pub fn stats(&self) -> ChainStats {
        let mut stats = ChainStats::default();
        for piece in self.iter() {
            stats.pieces += 1;
            stats.per_command[piece.command.index()] += 1;
            stats.output_len += piece.length;
            stats.encoded_len +=
                Header::new(piece.command, piece.length).encoded_len() + piece.argument.len();
        }
        // Terminator
        stats.encoded_len += 1;
        stats
    }
}

impl FromIterator<Piece> for PieceChain {
    fn from_iter<I: IntoIterator<Item = Piece>>(iter: I) -> Self {
        let mut chain = PieceChain::new();
        for piece in iter {
            chain.push(piece);
        }
        chain
    }
}

/// Statistics about a piece chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChainStats {
    /// Number of pieces
    pub pieces: usize,
    /// Pieces per command, indexed by command tag
    pub per_command: [usize; 5],
    /// Bytes the chain expands to
    pub output_len: usize,
    /// Serialized size including the terminator, assuming every piece fits a header
    pub encoded_len: usize,
}

impl ChainStats {
    /// Number of pieces using `command`.
    pub fn count(&self, command: Command) -> usize {
        self.per_command[command.index()]
    }

    /// Returns the compressed size as a percentage of the output size.
    pub fn compression_ratio(&self) -> f64 {
        if self.output_len == 0 {
            0.0
        } else {
            (self.encoded_len as f64 / self.output_len as f64) * 100.0
        }
    }
}
