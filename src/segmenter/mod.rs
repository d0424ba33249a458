//! Sentence-level segmentation over already-tokenized text: computes
//! separator spans on the raw string, then re-derives the segment boundaries
//! on the tokenized rendering of the same content.

use thiserror::Error;

pub mod aligner;
pub mod collector;

pub use aligner::{align, format_segments, Segment, SegmentKind};
pub use collector::collect_separator_spans;

/// Failures of the segmentation pipeline. Degenerate spans are not errors
/// (they are silently absorbed); nothing here is retried.
#[derive(Debug, Error)]
pub enum SegmentError {
    /// The tokenized string is not a recognized normalization of the raw
    /// string: the synchronized walk exhausted all known equivalences.
    #[error("alignment desynchronized at raw byte {raw_offset} ({raw_char:?}) vs tokenized byte {tok_offset} ({tok_char:?})")]
    AlignmentDesync {
        raw_offset: usize,
        tok_offset: usize,
        raw_char: Option<char>,
        tok_char: Option<char>,
    },

    /// A catalog matcher failed at evaluation time (backtracking limit).
    #[error("pattern evaluation failed")]
    Pattern(#[from] fancy_regex::Error),
}
