use twokenize::{
    align, collect_separator_spans, format_segments, PatternCatalog, SegmentError, SegmentKind,
    Tokenizer,
};

fn catalog() -> PatternCatalog {
    PatternCatalog::new().expect("catalog should compile")
}

#[test]
fn test_full_pipeline_two_sentences() {
    let raw = "hello there. Good bye!! #done";
    // Tokenized rendering as produced by the tokenizer itself.
    let tokenizer = Tokenizer::new().expect("tokenizer should build");
    let tokenized = tokenizer.tokenize(raw).unwrap().join(" ");
    assert_eq!(tokenized, "hello there . Good bye !! #done");

    let segments = align(&catalog(), raw, &tokenized).expect("alignment should succeed");
    let rendered = format_segments(&segments);
    assert_eq!(
        rendered,
        "text\thello there .\nsep\t \ntext\tGood bye !\nsep\t! #done\n"
    );
}

#[test]
fn test_identity_alignment() {
    let raw = "nothing segment worthy here";
    let segments = align(&catalog(), raw, raw).expect("alignment should succeed");
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].kind, SegmentKind::Text);
    assert_eq!(segments[0].content, raw);
}

#[test]
fn test_segment_tags_alternate() {
    let raw = "one done!! two done!! three";
    let tokenizer = Tokenizer::new().expect("tokenizer should build");
    let tokenized = tokenizer.tokenize(raw).unwrap().join(" ");
    let segments = align(&catalog(), raw, &tokenized).expect("alignment should succeed");
    assert!(segments.len() >= 3);
    for pair in segments.windows(2) {
        assert_ne!(pair[0].kind, pair[1].kind, "tags must alternate");
    }
}

/// Concatenated segment contents reproduce the consumed tokenized text, up
/// to the spaces swallowed at run edges.
#[test]
fn test_alignment_coverage_law() {
    let inputs = [
        "hello there. Good bye!! #done",
        "so fun :) more stuff",
        "wow... And then",
        "@someguy hello out there",
        "plain words only",
    ];
    let tokenizer = Tokenizer::new().expect("tokenizer should build");
    let patterns = catalog();
    let strip = |s: &str| s.chars().filter(|c| !c.is_whitespace()).collect::<String>();
    for raw in inputs {
        let tokenized = tokenizer.tokenize(raw).unwrap().join(" ");
        let segments = align(&patterns, raw, &tokenized).expect("alignment should succeed");
        let flat: String = segments.iter().map(|s| s.content.as_str()).collect();
        assert_eq!(strip(&flat), strip(&tokenized), "coverage broken for {raw:?}");
    }
}

#[test]
fn test_separator_spans_are_canonical() {
    let patterns = catalog();
    let raw = "Time @someguy: to go @man. Bye. bye. Really!? @woman #hashtag #yolo...";
    let spans = collect_separator_spans(&patterns, raw).expect("collection should succeed");
    for pair in spans.windows(2) {
        assert!(pair[1].start > pair[0].end, "spans not canonical: {spans:?}");
    }
}

#[test]
fn test_inconsistent_inputs_yield_typed_desync() {
    let err = align(&catalog(), "these words", "entirely other")
        .expect_err("mismatched inputs must not align");
    assert!(matches!(err, SegmentError::AlignmentDesync { .. }));
    // The error message names both offending characters for diagnostics.
    let message = err.to_string();
    assert!(message.contains("desynchronized"), "{message}");
}
