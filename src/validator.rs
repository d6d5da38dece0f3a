use crate::command::Mode;
use crate::compressor::{check_region, CompressOptions, Compressor};
use crate::decompressor::{emit, Decompressor};
use crate::error::{Lz2Error, Result};
use log::warn;

/// Compresses `source[start..end]`, decompresses the result and checks that
/// it reproduces the region exactly.
///
/// Returns the compressed stream. Any divergence is reported as
/// [`Lz2Error::RoundTripMismatch`] carrying the first differing offset.
pub fn validate_round_trip(source: &[u8], start: usize, end: usize, mode: Mode) -> Result<Vec<u8>> {
    let length = end.checked_sub(start).ok_or(Lz2Error::RegionOutOfBounds {
        start,
        length: 0,
        available: source.len(),
    })?;
    check_region(source, start, length)?;

    let packed = Compressor::new(CompressOptions::new(mode)).compress(source, start, length)?;
    check_round_trip(&source[start..end], &packed, mode)?;
    Ok(packed)
}

/// Checks that `packed` decodes to exactly `expected`.
pub(crate) fn check_round_trip(expected: &[u8], packed: &[u8], mode: Mode) -> Result<()> {
    let mut output = Vec::with_capacity(expected.len());
    if !packed.is_empty() {
        for piece in Decompressor::new(packed, 0, mode).pieces()? {
            emit(&piece, &mut output)?;
        }
    }

    let diverged = expected
        .iter()
        .zip(&output)
        .position(|(a, b)| a != b)
        .or_else(|| (expected.len() != output.len()).then(|| expected.len().min(output.len())));

    match diverged {
        Some(offset) => {
            warn!(
                "round trip diverges at offset {offset} ({} source bytes, {} decoded)",
                expected.len(),
                output.len()
            );
            Err(Lz2Error::RoundTripMismatch { offset })
        }
        None => Ok(()),
    }
}
