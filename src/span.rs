use std::cmp::Ordering;

/// Half-open byte interval `[start, end)` into a specific text buffer.
///
/// Spans are plain values: never mutated after creation, only replaced by the
/// explicit grow/merge operations below. Offsets always sit on UTF-8 char
/// boundaries because they originate from regex matches over `&str`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Boundary trimming can legally collapse a span to nothing (e.g. a bare
    /// "!?" run); empty spans still participate in growth and merging.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

impl Ord for Span {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.start, self.end).cmp(&(other.start, other.end))
    }
}

impl PartialOrd for Span {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Canonicalize a list of spans: sort by `(start, end)`, then fold any span
/// that overlaps or touches its predecessor into it, keeping the larger end.
///
/// The result is ascending, pairwise disjoint and non-touching
/// (`next.start > current.end` for every adjacent pair). Idempotent.
pub fn merge_spans(mut spans: Vec<Span>) -> Vec<Span> {
    spans.sort();
    let mut merged: Vec<Span> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(last) if span.start <= last.end => {
                last.end = last.end.max(span.end);
            }
            _ => merged.push(span),
        }
    }
    merged
}

/// Extend a span left and right over adjacent whitespace, clamped to the
/// buffer. Whitespace is Unicode-aware (`char::is_whitespace`), and movement
/// is per-char so offsets stay on char boundaries.
pub fn grow_over_whitespace(span: Span, text: &str) -> Span {
    let mut start = span.start;
    while let Some(c) = text[..start].chars().next_back() {
        if !c.is_whitespace() {
            break;
        }
        start -= c.len_utf8();
    }
    let mut end = span.end;
    while let Some(c) = text[end..].chars().next() {
        if !c.is_whitespace() {
            break;
        }
        end += c.len_utf8();
    }
    Span::new(start, end)
}
