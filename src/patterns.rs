use anyhow::{Context, Result};
use fancy_regex::Regex as FancyRegex;
use regex::Regex;
use tracing::{debug, info};

use crate::span::Span;

// The rule catalog below is assembled from string fragments, mirroring the
// long-lived ARK Twokenize rule set. Patterns needing lookaround compile with
// fancy-regex; everything else uses the plain regex crate.

const PUNCT_CHARS: &str = r#"['"“”‘’.?!…,:;]"#;
// 'anthem'. => ' anthem ' .
const PUNCT_SEQ: &str = r#"['"“”‘’]+|[.?!,…]+|[:;]+"#;
const ENTITY: &str = "&(?:amp|lt|gt|quot);";

const URL_START_1: &str = r"(?:https?://|\bwww\.)";
const COMMON_TLDS: &str = "(?:com|org|edu|gov|net|mil|aero|asia|biz|cat|coop|info|int|jobs|mobi|museum|name|pro|tel|travel|xxx)";
const CC_TLDS: &str = "(?:ac|ad|ae|af|ag|ai|al|am|an|ao|aq|ar|as|at|au|aw|ax|az|ba|bb|bd|be|bf|bg|bh|bi|bj|bm|bn|bo|br|bs|bt|\
bv|bw|by|bz|ca|cc|cd|cf|cg|ch|ci|ck|cl|cm|cn|co|cr|cs|cu|cv|cx|cy|cz|dd|de|dj|dk|dm|do|dz|ec|ee|eg|eh|\
er|es|et|eu|fi|fj|fk|fm|fo|fr|ga|gb|gd|ge|gf|gg|gh|gi|gl|gm|gn|gp|gq|gr|gs|gt|gu|gw|gy|hk|hm|hn|hr|ht|\
hu|id|ie|il|im|in|io|iq|ir|is|it|je|jm|jo|jp|ke|kg|kh|ki|km|kn|kp|kr|kw|ky|kz|la|lb|lc|li|lk|lr|ls|lt|\
lu|lv|ly|ma|mc|md|me|mg|mh|mk|ml|mm|mn|mo|mp|mq|mr|ms|mt|mu|mv|mw|mx|my|mz|na|nc|ne|nf|ng|ni|nl|no|np|\
nr|nu|nz|om|pa|pe|pf|pg|ph|pk|pl|pm|pn|pr|ps|pt|pw|py|qa|re|ro|rs|ru|rw|sa|sb|sc|sd|se|sg|sh|si|sj|sk|\
sl|sm|sn|so|sr|ss|st|su|sv|sy|sz|tc|td|tf|tg|th|tj|tk|tl|tm|tn|to|tp|tr|tt|tv|tw|tz|ua|ug|uk|us|uy|uz|\
va|vc|ve|vg|vi|vn|vu|wf|ws|ye|yt|za|zm|zw)";

const TIME_LIKE: &str = r"\d+(?::\d+){1,2}";
const NUMBER_WITH_COMMAS: &str = r"(?:(?<!\d)\d{1,3},)+?\d{3}(?=(?:[^,\d]|$))";
const NUM_COMB: &str = r"\p{Sc}?\d+(?:\.\d+)+%?";

const STANDARD_ABBREVIATIONS: &str = r"\b(?:[Mm]r|[Mm]rs|[Mm]s|[Dd]r|[Ss]r|[Jj]r|[Rr]ep|[Ss]en|[Ss]t)\.";
const SEPARATORS: &str = "(?:--+|―|—|~|–|=)";
const DECORATIONS: &str = r"(?:[♫♪]+|[★☆]+|[♥❤♡]+|[\u{2639}-\u{263b}]+|[\u{e001}-\u{ebbb}]+)";
const THINGS_THAT_SPLIT_WORDS: &str = r#"[^\s.,?"]"#;

const HEARTS: &str = "(?:<+/?3+)+";
const ARROWS: &str = r"(?:<*[-―—=]*>+|<+[-―—=]*>*)|[\u{2190}-\u{21ff}]+";
// Also catches "#1", "#40" which probably aren't hashtags, but work as tokens.
const HASHTAG: &str = r"#[\w]+";
const AT_MENTION: &str = r"[@＠][\w]+";

// Emoticon building blocks. 8 and x would be eyes too but cause problems.
const NORMAL_EYES: &str = "[:=]";
const WINK: &str = "[;]";
const NOSE_AREA: &str = "(?:|-|[^a-zA-Z0-9 ])"; // doesn't get :'-(
const HAPPY_MOUTHS: &str = r"[D\)\]\}]+";
const SAD_MOUTHS: &str = r"[\(\[\{]+";
const TONGUE: &str = "[pPd3]+";
const OTHER_MOUTHS: &str = r"(?:[oO]+|[/\\]+|[vV]+|[Ss]+|[|]+)";

/// Single glyphs that can flank a basic face like `^_^` or `o.o`.
const BASIC_FACE_SIDES: &[&str] = &[
    "♥", "0", "o", "°", "v", "$", "t", "x", ";", "\u{0CA0}", "@", "ʘ", "•", "・", "◕", "^", "¬",
    "*",
];

const EE_LEFT: &str = r"[＼\\ƪԄ\(（<>;ヽ\-=~\*]+";
const EE_RIGHT: &str = r#"[\-=\);'"<>ʃ）/／ノﾉ丿╯σっµ~\*]+"#;
const EE_SYMBOL: &str = r"[^A-Za-z0-9\s\(\)\*:=-]";

fn or(parts: &[&str]) -> String {
    format!("(?:{})", parts.join("|"))
}

fn url_start_2() -> String {
    format!(
        r"\b(?:[A-Za-z\d-])+(?:\.[A-Za-z0-9]+){{0,3}}\.(?:{common}|{cc})(?:\.{cc})?(?=\W|$)",
        common = COMMON_TLDS,
        cc = CC_TLDS
    )
}

fn url() -> String {
    let body = r"(?:[^\.\s<>][^\s<>]*?)?";
    let extra_crap_before_end = format!("(?:{PUNCT_CHARS}|{ENTITY})+?");
    let end = r"(?:\.\.+|[<>]|\s|$)";
    format!(
        "(?:{URL_START_1}|{start2}){body}(?=(?:{extra_crap_before_end})?{end})",
        start2 = url_start_2()
    )
}

// Word boundaries on both sides, expressed as fixed-width lookarounds.
const EMAIL: &str = r"(?<!\w)[\w.%+-]+@[\p{Alphabetic}0-9.-]+\.[\p{Alphabetic}]{2,4}(?!\w)";

fn boundary_not_dot() -> String {
    format!(r#"(?:$|\s|[“"?!,:;]|{ENTITY})"#)
}

fn arbitrary_abbrev() -> String {
    let b = boundary_not_dot();
    let aa1 = format!(r"(?:[A-Za-z]\.){{2,}}(?={b})");
    let aa2 = format!(r"[^\p{{Alphabetic}}](?:[\p{{Alphabetic}}]\.){{1,}}[\p{{Alphabetic}}](?={b})");
    format!("(?:{aa1}|{aa2}|{STANDARD_ABBREVIATIONS})")
}

fn embedded_apostrophe() -> String {
    format!("{THINGS_THAT_SPLIT_WORDS}+['’′]{THINGS_THAT_SPLIT_WORDS}*")
}

/// Faces like `^_^`, `o.o`, `(--')`, `<_<`. The flanking glyph must repeat on
/// both sides, expressed by enumerating the glyph set rather than a
/// backreference so the alternation stays self-contained.
fn basic_face() -> String {
    let mirrored: Vec<String> = BASIC_FACE_SIDES
        .iter()
        .map(|side| {
            let e = fancy_regex::escape(side);
            format!("{e}(?:[.]|[_-]+){e}")
        })
        .collect();
    format!(
        r#"(?i:{mirrored})|(?:--['"])|(?:<|&lt;|>|&gt;)[\._-]+(?:<|&lt;|>|&gt;)|(?:[.][_]+[.])"#,
        mirrored = mirrored.join("|")
    )
}

fn east_emote() -> String {
    format!(
        "{EE_LEFT}(?:{face}|{EE_SYMBOL})+{EE_RIGHT}",
        face = basic_face()
    )
}

fn emoticon() -> String {
    let eyes = or(&[NORMAL_EYES, WINK]);
    let standard = format!(
        "(?:>|&gt;)?{eyes}{nose}{mouth}",
        nose = or(&[NOSE_AREA, "[Oo]"]),
        mouth = or(&[
            &format!(r"{TONGUE}(?=\W|$|RT|rt|Rt)"),
            &format!(r"{OTHER_MOUTHS}(?=\W|$|RT|rt|Rt)"),
            SAD_MOUTHS,
            HAPPY_MOUTHS,
        ]),
    );
    // Reversed version (: D: -- eyes on the right are ambiguous with the
    // ordinary use of : and ;, so require a leading space or start-of-string.
    let reversed = format!(
        "(?<![^ ]){mouths}{NOSE_AREA}{eyes}(?:<|&lt;)?",
        mouths = or(&[SAD_MOUTHS, HAPPY_MOUTHS, OTHER_MOUTHS]),
    );
    format!(
        "(?i:{})",
        or(&[&standard, &reversed, &east_emote(), &basic_face()])
    )
}

fn protected_pattern() -> String {
    or(&[
        HEARTS,
        &url(),
        EMAIL,
        TIME_LIKE,
        NUMBER_WITH_COMMAS,
        NUM_COMB,
        &emoticon(),
        ARROWS,
        ENTITY,
        PUNCT_SEQ,
        &arbitrary_abbrev(),
        SEPARATORS,
        DECORATIONS,
        &embedded_apostrophe(),
        HASHTAG,
        AT_MENTION,
    ])
}

/// Protected matches we do not want to define segment separators with:
/// they are content, not boundaries.
fn unwanted_pattern() -> String {
    let alternation = or(&[
        &url(),
        EMAIL,
        TIME_LIKE,
        NUMBER_WITH_COMMAS,
        NUM_COMB,
        ENTITY,
        PUNCT_SEQ,
        &arbitrary_abbrev(),
        &embedded_apostrophe(),
        HASHTAG,
        AT_MENTION,
    ]);
    format!("^{alternation}$")
}

// Edge punctuation: want 'foo' => ' foo ' while don't => don't. The first is
// edge punctuation, the second is word-internal and must not be touched.
const EDGE_PUNCT: &str = r#"['"“”‘’«»{}\(\)\[\]\*&]"#;
const NOT_EDGE_PUNCT: &str = r"[\p{Alphabetic}0-9]";
const OFF_EDGE: &str = r"(^|$|:|;|\s|\.|,)"; // colon gets "(hello):" ==> "( hello ):"

/// Immutable, compiled-once rule catalog for tokenization and segmentation.
///
/// Construction compiles every matcher up front so all later calls are pure
/// functions over their inputs.
pub struct PatternCatalog {
    protected: FancyRegex,
    unwanted: FancyRegex,
    pub(crate) whitespace: Regex,
    pub(crate) edge_punct_left: Regex,
    pub(crate) edge_punct_right: Regex,
    pub(crate) contractions: Regex,
    pub(crate) easy_protections: Regex,
    pub(crate) sentence_boundary: Regex,
    pub(crate) backward_context: FancyRegex,
    pub(crate) forward_context: FancyRegex,
}

impl PatternCatalog {
    /// Compile the full rule catalog into an immutable catalog value.
    pub fn new() -> Result<Self> {
        info!("Compiling tokenization pattern catalog");

        let protected = FancyRegex::new(&protected_pattern())
            .context("compiling PROTECTED alternation")?;
        let unwanted = FancyRegex::new(&unwanted_pattern())
            .context("compiling UNWANTED alternation")?;

        let whitespace =
            Regex::new(r"[\s\p{Zs}]+").context("compiling whitespace squeezer")?;
        let edge_punct_left =
            Regex::new(&format!("{OFF_EDGE}({EDGE_PUNCT}+)({NOT_EDGE_PUNCT})"))
                .context("compiling left edge punctuation matcher")?;
        let edge_punct_right =
            Regex::new(&format!("({NOT_EDGE_PUNCT})({EDGE_PUNCT}+){OFF_EDGE}"))
                .context("compiling right edge punctuation matcher")?;
        let contractions = Regex::new(
            r"(?i)(\w+)(n['’′]t|['’′]ve|['’′]ll|['’′]d|['’′]re|['’′]s|['’′]m)$",
        )
        .context("compiling contraction splitter")?;

        // Segmentation-only matchers.
        let easy_protections = Regex::new(
            r"(?:@[\w]+:|\(?https?://[^\s]+|:'-?\(+|8D+|[xX][dD]+|\.\.+)",
        )
        .context("compiling easy segment protections")?;
        // Group 1 captures the gap between a full stop and the following
        // capital; the collector uses it for the dot-specific trim rule.
        let sentence_boundary = Regex::new(r"\.(\s+)[\p{Lu}\p{Lt}]|[!?]+")
            .context("compiling sentence boundary detector")?;
        let handle_or_domain = format!(r"[^\s]*@(?:{}|\w+)", url_start_2());
        let backward_context =
            FancyRegex::new(&format!(r"(?:{handle_or_domain}|#[\w]+)"))
                .context("compiling backward context matcher")?;
        let forward_context = FancyRegex::new(&handle_or_domain)
            .context("compiling forward context matcher")?;

        debug!("Pattern catalog compiled");

        Ok(Self {
            protected,
            unwanted,
            whitespace,
            edge_punct_left,
            edge_punct_right,
            contractions,
            easy_protections,
            sentence_boundary,
            backward_context,
            forward_context,
        })
    }

    /// All non-overlapping PROTECTED matches in left-to-right order.
    /// Zero-length matches are silently discarded.
    pub fn protected_matches(&self, text: &str) -> Result<Vec<Span>, fancy_regex::Error> {
        let mut spans = Vec::new();
        for m in self.protected.find_iter(text) {
            let m = m?;
            if m.start() < m.end() {
                spans.push(Span::new(m.start(), m.end()));
            }
        }
        Ok(spans)
    }

    /// Whether the entire string also satisfies the narrower UNWANTED rules,
    /// i.e. it is protected content that must not become a separator.
    pub fn is_unwanted(&self, text: &str) -> Result<bool, fancy_regex::Error> {
        self.unwanted.is_match(text)
    }
}
