use twokenize::{split_edge_punct, squeeze_whitespace, Tokenizer, TokenizerConfig};

fn tokenize(text: &str) -> Vec<String> {
    let tokenizer = Tokenizer::new().expect("tokenizer should build");
    tokenizer.tokenize(text).expect("tokenization should succeed")
}

#[test]
fn test_protected_spans_survive_whole() {
    assert_eq!(
        tokenize("check http://example.com/page now"),
        vec!["check", "http://example.com/page", "now"]
    );
    assert_eq!(tokenize("wait!!! :)"), vec!["wait", "!!!", ":)"]);
    assert_eq!(
        tokenize("hello (#hashtag)"),
        vec!["hello", "(", "#hashtag", ")"]
    );
    assert_eq!(
        tokenize("hello (@person)"),
        vec!["hello", "(", "@person", ")"]
    );
}

#[test]
fn test_mention_with_emoticons() {
    assert_eq!(
        tokenize("@aliciakeys Put it in a love song :-))"),
        vec!["@aliciakeys", "Put", "it", "in", "a", "love", "song", ":-))"]
    );
}

#[test]
fn test_numbers_times_emails() {
    assert_eq!(
        tokenize("at 13:00 send 420.00 to de@post.de"),
        vec!["at", "13:00", "send", "420.00", "to", "de@post.de"]
    );
}

#[test]
fn test_messy_whitespace_is_squeezed() {
    assert_eq!(
        tokenize("  so \t many\n\nspaces "),
        vec!["so", "many", "spaces"]
    );
}

#[test]
fn test_edge_punctuation_detaches_only_at_boundaries() {
    assert_eq!(tokenize("'foo'"), vec!["'", "foo", "'"]);
    assert_eq!(tokenize("don't stop"), vec!["don't", "stop"]);
}

#[test]
fn test_contraction_splitting_is_opt_in() {
    let splitting = Tokenizer::with_config(TokenizerConfig {
        split_contractions: true,
    })
    .expect("tokenizer should build");
    assert_eq!(
        splitting.tokenize("you're right").unwrap(),
        vec!["you", "'re", "right"]
    );
    assert_eq!(tokenize("you're right"), vec!["you're", "right"]);
}

#[test]
fn test_raw_tweet_entities_decoded() {
    let tokenizer = Tokenizer::new().expect("tokenizer should build");
    assert_eq!(
        tokenizer.tokenize_raw_tweet("fish &amp; chips &amp;lt; more").unwrap(),
        vec!["fish", "&", "chips", "<", "more"]
    );
}

/// Concatenating all tokens and deleting whitespace must reproduce the
/// edge-punctuated input with whitespace deleted: nothing dropped,
/// duplicated, or invented.
#[test]
fn test_token_coverage_law() {
    let tokenizer = Tokenizer::new().expect("tokenizer should build");
    let inputs = [
        "So http://some.one or what.hu/s at 13.00 or, you know... 13:00",
        "\"his highness\" said xD 420.00 and :))) $13.00 for 100%",
        "no [: 100.01% - yeah #yolo! Okay, that :D was fun XD anyway <3",
        "look at http://what.me for de@post.de Germans admin@post.de :'(",
        "Time @someguy: to go @man. Bye. bye. Really!? @woman #hashtag #yolo...",
    ];
    let strip = |s: &str| s.chars().filter(|c| !c.is_whitespace()).collect::<String>();
    for input in inputs {
        let tokens = tokenizer.tokenize(input).unwrap();
        let squeezed = squeeze_whitespace(tokenizer.patterns(), input);
        let edge = split_edge_punct(tokenizer.patterns(), &squeezed);
        assert_eq!(
            strip(&tokens.join(" ")),
            strip(&edge),
            "coverage broken for {input:?}"
        );
    }
}
