use tracing::debug;

use crate::patterns::PatternCatalog;
use crate::tokenizer::squeeze_whitespace;

use super::{collect_separator_spans, SegmentError};

/// Tag of one aligned run of the raw text partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Text,
    Separator,
}

impl SegmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SegmentKind::Text => "text",
            SegmentKind::Separator => "sep",
        }
    }
}

/// One boundary-tagged run of tokenized content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub content: String,
}

/// Re-derive segment boundaries on a previously tokenized string.
///
/// `tokenized` must be a space-joined token rendering of the same logical
/// content as `raw_unsqueezed`; the two may still differ through a fixed set
/// of normalizations (smart quotes, dashes, ellipses). Separator spans are
/// computed on the squeezed raw text, and a character-synchronized walk fills
/// each run with the corresponding tokenized content.
pub fn align(
    patterns: &PatternCatalog,
    raw_unsqueezed: &str,
    tokenized: &str,
) -> Result<Vec<Segment>, SegmentError> {
    let raw = squeeze_whitespace(patterns, raw_unsqueezed);
    let separators = collect_separator_spans(patterns, &raw)?;

    // Every span start/end is a state change; the text length closes the
    // final run.
    let mut boundaries: Vec<usize> = Vec::with_capacity(2 * separators.len() + 1);
    for span in &separators {
        boundaries.push(span.start);
        boundaries.push(span.end);
    }
    boundaries.push(raw.len());
    debug!(runs = boundaries.len(), "aligning runs");

    let mut segments: Vec<Segment> = Vec::new();
    let mut i_raw = 0usize;
    let mut i_tok = 0usize;
    let mut in_separator = false;
    let mut first = true;

    for &stop in &boundaries {
        if i_raw == raw.len() {
            break;
        }
        // A separator at offset zero means the partition begins in
        // separator state instead of text state.
        if first && boundaries[0] == 0 {
            first = false;
            in_separator = !in_separator;
            continue;
        }
        first = false;

        let mut content = String::new();
        let mut after_first_non_space = false;
        while i_raw < stop {
            let step = sync_step(
                &raw,
                tokenized,
                i_raw,
                i_tok,
                in_separator,
                after_first_non_space,
            )?;
            content.push_str(&step.emit);
            i_raw += step.raw_advance;
            i_tok += step.tok_advance;
            after_first_non_space |= step.non_space;
        }
        segments.push(Segment {
            kind: if in_separator {
                SegmentKind::Separator
            } else {
                SegmentKind::Text
            },
            content,
        });
        in_separator = !in_separator;
    }

    Ok(segments)
}

struct SyncStep {
    emit: String,
    raw_advance: usize,
    tok_advance: usize,
    non_space: bool,
}

impl SyncStep {
    fn emit(text: impl Into<String>, raw_advance: usize, tok_advance: usize) -> Self {
        Self {
            emit: text.into(),
            raw_advance,
            tok_advance,
            non_space: true,
        }
    }
}

/// One transition of the alignment automaton: decide how the cursors move and
/// what lands in the output for the current pair of characters.
fn sync_step(
    raw: &str,
    tokenized: &str,
    i_raw: usize,
    i_tok: usize,
    in_separator: bool,
    after_first_non_space: bool,
) -> Result<SyncStep, SegmentError> {
    let raw_rest = &raw[i_raw..];
    let tok_rest = tokenized.get(i_tok..).unwrap_or("");

    let desync = |raw_char: Option<char>, tok_char: Option<char>| SegmentError::AlignmentDesync {
        raw_offset: i_raw,
        tok_offset: i_tok,
        raw_char,
        tok_char,
    };

    let Some(c_raw) = raw_rest.chars().next() else {
        return Err(desync(None, tok_rest.chars().next()));
    };
    let Some(c_tok) = tok_rest.chars().next() else {
        return Err(desync(Some(c_raw), None));
    };

    let step = if c_tok == c_raw
        || (c_tok == '“' && matches!(c_raw, '"' | '«' | '”'))
        || (c_tok == '”' && matches!(c_raw, '"' | '»' | '“'))
    {
        SyncStep::emit(c_tok, c_raw.len_utf8(), c_tok.len_utf8())
    } else if (c_tok == '“' || c_tok == '”') && raw_rest.starts_with("''") {
        // Tokenization turned two ASCII single quotes into one smart quote.
        SyncStep::emit(c_tok, 2, c_tok.len_utf8())
    } else if tok_rest.starts_with("--") && (c_raw == '–' || c_raw == '—') {
        SyncStep::emit("--", c_raw.len_utf8(), 2)
    } else if c_tok == '…' && raw_rest.starts_with("...") {
        SyncStep::emit('…', 3, '…'.len_utf8())
    } else if tok_rest.starts_with("...") && c_raw == '…' {
        SyncStep::emit("...", '…'.len_utf8(), 3)
    } else if c_tok == ' ' {
        // Token-separating space inserted by the tokenizer: consume it, and
        // only echo it inside text runs once content has started.
        let emit = if !in_separator && after_first_non_space {
            " "
        } else {
            ""
        };
        SyncStep {
            emit: emit.to_string(),
            raw_advance: 0,
            tok_advance: 1,
            non_space: false,
        }
    } else {
        return Err(desync(Some(c_raw), Some(c_tok)));
    };
    Ok(step)
}

/// Render segments in the line-oriented `kind<TAB>content` form.
pub fn format_segments(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        out.push_str(segment.kind.as_str());
        out.push('\t');
        out.push_str(&segment.content);
        out.push('\n');
    }
    out
}
