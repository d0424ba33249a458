pub mod patterns;
pub mod segmenter;
pub mod span;
pub mod tokenizer;

// Re-export main types for convenient access
pub use patterns::PatternCatalog;
pub use span::{grow_over_whitespace, merge_spans, Span};
pub use tokenizer::{
    normalize_entities, split_edge_punct, squeeze_whitespace, Tokenizer, TokenizerConfig,
};

pub use segmenter::{
    align, collect_separator_spans, format_segments, Segment, SegmentError, SegmentKind,
};
