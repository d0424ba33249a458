use tracing::debug;

use crate::patterns::PatternCatalog;
use crate::span::{grow_over_whitespace, merge_spans, Span};

use super::SegmentError;

/// Compute the canonical list of separator spans over squeezed raw text.
///
/// Candidates come from several independent detectors; each span is grown
/// over adjacent whitespace and the whole set is merged at the end, so the
/// result is ascending, disjoint and non-touching.
pub fn collect_separator_spans(
    patterns: &PatternCatalog,
    raw: &str,
) -> Result<Vec<Span>, SegmentError> {
    let mut spans: Vec<Span> = Vec::new();

    // Protected matches keep things like URLs and numbers from being mistaken
    // for boundaries -- unless the whole match is unwanted as a separator.
    for span in patterns.protected_matches(raw)? {
        if !patterns.is_unwanted(&raw[span.start..span.end])? {
            spans.push(span);
        }
    }

    // Easy literal protections: mention+colon, parenthesized URLs, crying and
    // laughing faces, multi-dot runs.
    for m in patterns.easy_protections.find_iter(raw) {
        spans.push(Span::new(m.start(), m.end()));
    }

    // Sentence boundaries. The separator start shifts right so the
    // punctuation itself stays with the preceding text.
    for caps in patterns.sentence_boundary.captures_iter(raw) {
        let Some(m) = caps.get(0) else { continue };
        if let Some(gap) = caps.get(1) {
            // Full stop plus capital: only the gap in between separates.
            spans.push(Span::new(gap.start(), gap.end()));
        } else if m.as_str().starts_with("!?") {
            // Present the whole "!?" to the following text consumer.
            spans.push(Span::new(m.start() + 2, m.end()));
        } else {
            // Pure !/? run: exclude exactly one punctuation mark.
            spans.push(Span::new(m.start() + 1, m.end()));
        }
    }

    for span in &mut spans {
        *span = grow_over_whitespace(*span, raw);
    }

    // The context-sensitive detectors only depend on context in one
    // direction each, so a backward and a forward pass catch them all.
    backward_context_pass(patterns, raw, &mut spans)?;
    forward_context_pass(patterns, raw, &mut spans)?;

    let merged = merge_spans(spans);
    debug!(count = merged.len(), "collected separator spans");
    Ok(merged)
}

/// Trailing handle/domain and hashtag detection. A candidate is accepted when
/// it ends at end-of-text or its end reaches into the start boundary of a
/// span accepted so far; candidates are visited in reverse textual order so
/// the touching test runs against spans already finalized to its right.
fn backward_context_pass(
    patterns: &PatternCatalog,
    raw: &str,
    spans: &mut Vec<Span>,
) -> Result<(), SegmentError> {
    let mut candidates: Vec<Span> = Vec::new();
    for m in patterns.backward_context.find_iter(raw) {
        let m = m?;
        candidates.push(Span::new(m.start(), m.end()));
    }
    for cand in candidates.iter().rev() {
        let touching = cand.end == raw.len()
            || spans
                .iter()
                .any(|s| cand.end >= s.start && cand.start < s.start);
        if touching {
            spans.push(grow_over_whitespace(*cand, raw));
        }
    }
    Ok(())
}

/// Leading handle/domain detection, scanned forward: accepted when the match
/// starts at offset zero or within the end boundary of an accepted span.
fn forward_context_pass(
    patterns: &PatternCatalog,
    raw: &str,
    spans: &mut Vec<Span>,
) -> Result<(), SegmentError> {
    let mut candidates: Vec<Span> = Vec::new();
    for m in patterns.forward_context.find_iter(raw) {
        let m = m?;
        candidates.push(Span::new(m.start(), m.end()));
    }
    for cand in &candidates {
        let touching = cand.start == 0
            || spans
                .iter()
                .any(|s| cand.start <= s.end && cand.end > s.end);
        if touching {
            spans.push(grow_over_whitespace(*cand, raw));
        }
    }
    Ok(())
}
