// transform.rs - 在 R1/R2 之间移动碱基和质量值

use crate::record::FastqRecord;

/// Which way bases move across the R1/R2 boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// R1 keeps the structured prefix; everything after it is prepended to R2
    #[default]
    Split,
    /// Move leading R2 bases back onto the end of R1
    Restore,
}

/// How many leading R2 bases a restore moves back into R1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RestoreSpan {
    /// Move as many bases as the matched protocol's cut point
    #[default]
    CutPoint,
    /// Move whatever brings R1 back up to this many bases. With the R1 read
    /// length of the original run this exactly undoes a split.
    ReadLength(usize),
}

/// Rewrites a read pair at a cut point. Sequence and quality are always
/// sliced with the same bounds, so their lengths stay equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryTransformer {
    direction: Direction,
    restore_span: RestoreSpan,
}

impl BoundaryTransformer {
    pub fn new(direction: Direction) -> Self {
        BoundaryTransformer { direction, restore_span: RestoreSpan::CutPoint }
    }

    pub fn with_restore_span(mut self, restore_span: RestoreSpan) -> Self {
        self.restore_span = restore_span;
        self
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn apply(&self, r1: &mut FastqRecord, r2: &mut FastqRecord, cut_point: usize) {
        match self.direction {
            Direction::Split => split(r1, r2, cut_point),
            Direction::Restore => {
                let span = match self.restore_span {
                    RestoreSpan::CutPoint => cut_point,
                    RestoreSpan::ReadLength(len) => len.saturating_sub(r1.sequence.len()),
                };
                restore(r1, r2, span);
            }
        }
    }
}

/// `R1 -> R1[..cut]`, `R2 -> R1[cut..] ++ R2`.
///
/// A cut point past the end of R1 is clamped, leaving R2 unchanged.
pub fn split(r1: &mut FastqRecord, r2: &mut FastqRecord, cut_point: usize) {
    let cut = cut_point.min(r1.sequence.len());
    move_tail_to_front(&mut r1.sequence, &mut r2.sequence, cut);
    move_tail_to_front(&mut r1.quality, &mut r2.quality, cut);
}

/// `R1 -> R1 ++ R2[..span]`, `R2 -> R2[span..]`.
///
/// A span past the end of R2 is clamped, moving all of R2 into R1.
pub fn restore(r1: &mut FastqRecord, r2: &mut FastqRecord, span: usize) {
    let span = span.min(r2.sequence.len());
    move_head_to_back(&mut r2.sequence, &mut r1.sequence, span);
    move_head_to_back(&mut r2.quality, &mut r1.quality, span);
}

fn move_tail_to_front(from: &mut Vec<u8>, to: &mut Vec<u8>, at: usize) {
    let mut tail = from.split_off(at);
    tail.extend_from_slice(to);
    *to = tail;
}

fn move_head_to_back(from: &mut Vec<u8>, to: &mut Vec<u8>, at: usize) {
    to.extend(from.drain(..at));
}
