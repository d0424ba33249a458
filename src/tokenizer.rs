use anyhow::Result;
use tracing::debug;

use crate::patterns::PatternCatalog;

/// Collapse every whitespace run to a single ASCII space and trim the ends.
/// `"foo   bar "` => `"foo bar"`. Idempotent.
pub fn squeeze_whitespace(patterns: &PatternCatalog, text: &str) -> String {
    patterns
        .whitespace
        .replace_all(text, " ")
        .trim()
        .to_string()
}

/// Detach edge punctuation from adjacent word content: `'foo'` => `' foo '`
/// while `don't` stays whole. Two sequential substitutions, left-bound first,
/// so a char flanked by punctuation on both recognized boundaries is split
/// once per side.
pub fn split_edge_punct(patterns: &PatternCatalog, text: &str) -> String {
    let left = patterns
        .edge_punct_left
        .replace_all(text, "${1}${2} ${3}");
    patterns
        .edge_punct_right
        .replace_all(&left, "${1} ${2}${3}")
        .into_owned()
}

/// Literal-replace `&amp;` first to correct doubly escaped input, then decode
/// the remaining HTML entities.
pub fn normalize_entities(text: &str) -> String {
    let corrected = text.replace("&amp;", "&");
    html_escape::decode_html_entities(&corrected).into_owned()
}

/// Configuration for the tokenizer's optional passes.
#[derive(Debug, Clone, Default)]
pub struct TokenizerConfig {
    /// Split clitic contractions ("you're" => "you 're") as a final pass.
    /// Off by default: the downstream POS tagger wants "you're" as one token.
    pub split_contractions: bool,
}

/// Tokenizer for short noisy social-media text.
///
/// Interleaves protected spans (URLs, emoticons, abbreviations, ...) as
/// atomic tokens with whitespace-split tokens from the remaining regions.
pub struct Tokenizer {
    patterns: PatternCatalog,
    config: TokenizerConfig,
}

impl Tokenizer {
    /// Create a tokenizer with default configuration, compiling the catalog.
    pub fn new() -> Result<Self> {
        Self::with_config(TokenizerConfig::default())
    }

    pub fn with_config(config: TokenizerConfig) -> Result<Self> {
        let patterns = PatternCatalog::new()?;
        Ok(Self { patterns, config })
    }

    pub fn patterns(&self) -> &PatternCatalog {
        &self.patterns
    }

    /// Tokenize text that carries no HTML escaping.
    pub fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        let squeezed = squeeze_whitespace(&self.patterns, text);
        let split_punct = split_edge_punct(&self.patterns, &squeezed);

        // Protected subsequences must survive unsplit: URLs, 1.0, U.N.K.L.E.,
        // 12:53, emoticons. Everything between them splits on spaces.
        let protected = self.patterns.protected_matches(&split_punct)?;
        debug!(count = protected.len(), "collected protected spans");

        let mut tokens: Vec<String> = Vec::new();
        let mut cursor = 0;
        for span in &protected {
            push_space_split(&mut tokens, &split_punct[cursor..span.start]);
            push_clean(&mut tokens, &split_punct[span.start..span.end]);
            cursor = span.end;
        }
        push_space_split(&mut tokens, &split_punct[cursor..]);

        if self.config.split_contractions {
            tokens = self.split_contractions_pass(tokens);
        }
        Ok(tokens)
    }

    /// Tokenize raw tweet text, which comes HTML-escaped (sometimes doubly).
    /// The returned tokens may therefore not be exact substrings of the input.
    pub fn tokenize_raw_tweet(&self, text: &str) -> Result<Vec<String>> {
        self.tokenize(&normalize_entities(text))
    }

    fn split_contractions_pass(&self, tokens: Vec<String>) -> Vec<String> {
        let mut out = Vec::with_capacity(tokens.len());
        for token in tokens {
            match self.patterns.contractions.captures(&token) {
                Some(caps) => {
                    out.push(caps[1].to_string());
                    out.push(caps[2].to_string());
                }
                None => out.push(token),
            }
        }
        out
    }
}

/// Split a complement region on single spaces, dropping empties; whitespace
/// was already squeezed so no other separators occur.
fn push_space_split(tokens: &mut Vec<String>, region: &str) {
    for part in region.trim().split(' ') {
        push_clean(tokens, part);
    }
}

fn push_clean(tokens: &mut Vec<String>, piece: &str) {
    let trimmed = piece.trim();
    if !trimmed.is_empty() {
        tokens.push(trimmed.to_string());
    }
}
