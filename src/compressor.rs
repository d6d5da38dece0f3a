use crate::chain::PieceChain;
use crate::command::{Mode, MAX_NORMAL_LENGTH};
use crate::error::{Lz2Error, Result};
use crate::heuristics::Candidates;
use crate::piece::Piece;
use crate::serializer::serialize;
use crate::validator::check_round_trip;
use log::{debug, trace};

/// Settings for a compression run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompressOptions {
    /// Byte order of back-reference offsets.
    pub mode: Mode,
    /// Decompress the result and compare it with the source before returning.
    pub validate: bool,
}

impl CompressOptions {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            validate: false,
        }
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }
}

/// LC-LZ2 compressor.
///
/// Walks the source once, left to right. At every position each fill-style
/// command is measured; the best one that pays for its header becomes a
/// piece, otherwise the byte joins a run of literals that is flushed as a
/// DirectCopy piece.
///
/// # Example
///
/// ```
/// use lc_lz2::{CompressOptions, Compressor};
///
/// let compressor = Compressor::new(CompressOptions::default());
/// let packed = compressor.compress(&[0x2A; 5], 0, 5).unwrap();
/// assert_eq!(packed, vec![0x24, 0x2A, 0xFF]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Compressor {
    options: CompressOptions,
}

impl Compressor {
    pub fn new(options: CompressOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CompressOptions {
        &self.options
    }

    /// Compresses `source[start..start + length]` into a complete stream,
    /// terminator included. An empty region yields an empty stream.
    pub fn compress(&self, source: &[u8], start: usize, length: usize) -> Result<Vec<u8>> {
        let chain = self.build_chain(source, start, length)?;
        if chain.is_empty() {
            return Ok(Vec::new());
        }

        let chain = chain.split()?.merge();
        let stats = chain.stats();
        let packed = serialize(&chain, self.options.mode)?;
        debug!(
            "compressed {} bytes at {:#x} into {} bytes ({} pieces, {:.1}%)",
            length,
            start,
            packed.len(),
            stats.pieces,
            stats.compression_ratio()
        );

        if self.options.validate {
            check_round_trip(&source[start..start + length], &packed, self.options.mode)?;
        }
        Ok(packed)
    }

    /// Runs the driver alone, returning the unsplit, unmerged chain.
    pub fn build_chain(&self, source: &[u8], start: usize, length: usize) -> Result<PieceChain> {
        check_region(source, start, length)?;
        let mut chain = PieceChain::new();
        if length == 0 {
            return Ok(chain);
        }

        let last = start + length - 1;
        let mut pos = start;
        let mut pending = 0;

        while pos <= last {
            let candidates = Candidates::scan(source, pos, last, start);
            match candidates.select() {
                Some((command, taken)) => {
                    flush_literals(&mut chain, source, pos, &mut pending);
                    let piece = Piece::new(command, taken, candidates.argument(command));
                    trace!("{:#x}: {piece}", pos - start);
                    chain.push(piece);
                    pos += taken;
                }
                None => {
                    pos += 1;
                    pending += 1;
                    // Literals go out in normal-header sized groups; the merger joins them.
                    if pending == MAX_NORMAL_LENGTH {
                        flush_literals(&mut chain, source, pos, &mut pending);
                    }
                }
            }
        }
        flush_literals(&mut chain, source, pos, &mut pending);

        Ok(chain)
    }
}

/// Emits the `pending` literals that end just before `pos`.
fn flush_literals(chain: &mut PieceChain, source: &[u8], pos: usize, pending: &mut usize) {
    if *pending == 0 {
        return;
    }
    let piece = Piece::direct_copy(&source[pos - *pending..pos]);
    trace!("literals: {piece}");
    chain.push(piece);
    *pending = 0;
}

pub(crate) fn check_region(source: &[u8], start: usize, length: usize) -> Result<()> {
    match start.checked_add(length) {
        Some(end) if end <= source.len() => Ok(()),
        _ => Err(Lz2Error::RegionOutOfBounds {
            start,
            length,
            available: source.len(),
        }),
    }
}
