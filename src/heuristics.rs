//! Per-position command candidates and the byte-gain selection rule.

use crate::command::{Command, MAX_PIECE_LENGTH};

/// Minimum length a candidate must beat before it is worth a header.
const BREAK_EVEN: usize = 2;

/// Argument bytes each command costs, indexed by command tag.
const ARGUMENT_COST: [usize; 5] = [0, 1, 2, 1, 2];

/// Best run each fill-style command achieves at one cursor position.
///
/// Scratch state: rebuilt for every position the compressor visits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Candidates {
    lengths: [usize; 5],
    arguments: [[u8; 2]; 5],
}

impl Candidates {
    /// Runs every heuristic at `pos`.
    ///
    /// `last` is the last source index of the unit and `start` its first,
    /// which is also where back-reference offsets are measured from.
    pub(crate) fn scan(data: &[u8], pos: usize, last: usize, start: usize) -> Self {
        let mut candidates = Candidates::default();

        let (length, byte) = byte_fill(data, pos, last);
        candidates.record(Command::ByteFill, length, [byte, 0]);

        if let Some((length, pair)) = word_fill(data, pos, last) {
            candidates.record(Command::WordFill, length, pair);
        }

        let (length, seed) = increasing_fill(data, pos, last);
        candidates.record(Command::IncreasingFill, length, [seed, 0]);

        if let Some((length, offset)) = repeating_bytes(data, pos, last, start) {
            candidates.record(Command::RepeatingBytes, length, offset.to_le_bytes());
        }

        candidates
    }

    fn record(&mut self, command: Command, length: usize, argument: [u8; 2]) {
        self.lengths[command.index()] = length;
        self.arguments[command.index()] = argument;
    }

    pub(crate) fn length(&self, command: Command) -> usize {
        self.lengths[command.index()]
    }

    /// Argument bytes for `command`, in piece storage order.
    pub(crate) fn argument(&self, command: Command) -> Vec<u8> {
        let size = command.argument_size().unwrap_or(0);
        self.arguments[command.index()][..size].to_vec()
    }

    /// Picks the command that covers the most bytes.
    ///
    /// A candidate has to beat both the best length so far and its own
    /// argument cost; ties keep the earlier command. A three byte
    /// back-reference costs as much as copying the three bytes, so it never
    /// wins. `None` means the byte goes to the literal accumulator.
    pub(crate) fn select(&self) -> Option<(Command, usize)> {
        let mut best = None;
        let mut max_win = BREAK_EVEN;

        for command in &Command::ALL[1..] {
            let taken = self.length(*command);
            if *command == Command::RepeatingBytes && taken == 3 {
                continue;
            }
            if taken > max_win && taken > ARGUMENT_COST[command.index()] {
                best = Some((*command, taken));
                max_win = taken;
            }
        }

        best
    }
}

/// Length of the run of `data[pos]`.
pub(crate) fn byte_fill(data: &[u8], pos: usize, last: usize) -> (usize, u8) {
    let byte = data[pos];
    let length = data[pos..=last].iter().take_while(|&&b| b == byte).count();
    (length, byte)
}

/// Length of the alternating run of `data[pos]`, `data[pos + 1]`.
///
/// Needs at least three bytes left and two different lead bytes; the length
/// always covers whole pairs.
pub(crate) fn word_fill(data: &[u8], pos: usize, last: usize) -> Option<(usize, [u8; 2])> {
    if pos + 2 > last || data[pos] == data[pos + 1] {
        return None;
    }

    let pair = [data[pos], data[pos + 1]];
    let mut length = 2;
    while pos + length < last && data[pos + length..pos + length + 2] == pair {
        length += 2;
    }
    Some((length, pair))
}

/// Length of the run `data[pos]`, `data[pos] + 1`, ... (mod 256).
pub(crate) fn increasing_fill(data: &[u8], pos: usize, last: usize) -> (usize, u8) {
    let seed = data[pos];
    let mut expected = seed;
    let length = data[pos..=last]
        .iter()
        .take_while(|&&b| {
            let hit = b == expected;
            expected = expected.wrapping_add(1);
            hit
        })
        .count();
    (length, seed)
}

/// Longest earlier match for the bytes at `pos`, searched from `start`.
///
/// A match may not reach into `pos` itself. After a match the search resumes
/// at the first mismatching source index rather than one past the match
/// start, so the result is the greedy LC-LZ2 choice, not the true longest
/// match. Returns the run length and its offset from `start`.
pub(crate) fn repeating_bytes(
    data: &[u8],
    pos: usize,
    last: usize,
    start: usize,
) -> Option<(usize, u16)> {
    let mut best: Option<(usize, u16)> = None;
    let mut searching = start;

    while searching < pos {
        while searching < pos && data[searching] != data[pos] {
            searching += 1;
        }

        let origin = searching;
        let mut current = pos;
        while current <= last && searching < pos && data[current] == data[searching] {
            current += 1;
            searching += 1;
        }

        // Offsets past 0xFFFF cannot be encoded.
        if let Ok(offset) = u16::try_from(origin - start) {
            let copied = (current - pos).min(max_copy_length(offset));
            if best.map_or(copied > 0, |(length, _)| copied > length) {
                best = Some((copied, offset));
            }
        }
    }

    best
}

/// Longest back-reference from `offset` whose split pieces all keep an
/// encodable offset. Each 1024 byte piece advances the offset by 1024.
pub(crate) fn max_copy_length(offset: u16) -> usize {
    (usize::from(u16::MAX - offset) / MAX_PIECE_LENGTH + 1) * MAX_PIECE_LENGTH
}
