//! Compiled patterns and quantity extraction for the estimator cascade.
//!
//! All patterns run against the lowercased prompt. Keyword tables are
//! compiled into one alternation per table, bounded so that a phrase only
//! matches as a whole word ("war" does not match "software").

use std::sync::LazyLock;

use regex::Regex;

use super::tables::{self, Language};

/// Compile phrases into a single whole-word alternation.
///
/// `+` and `#` count as word characters so "c" never matches inside "c++".
pub fn phrase_regex(phrases: &[&str]) -> Regex {
    let alternation = phrases
        .iter()
        .map(|p| regex::escape(p))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?:^|[^\w+#])(?:{alternation})(?:$|[^\w+#])"))
        .expect("phrase tables compile to a valid regex")
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static estimator pattern is valid")
}

// ---------------------------------------------------------------------------
// Keyword families
// ---------------------------------------------------------------------------

pub static SOCIO_POLITICAL: LazyLock<Regex> =
    LazyLock::new(|| phrase_regex(tables::SOCIO_POLITICAL));
pub static OPINION: LazyLock<Regex> = LazyLock::new(|| phrase_regex(tables::OPINION_INDICATORS));
pub static CREATIVE_NOUN: LazyLock<Regex> = LazyLock::new(|| phrase_regex(tables::CREATIVE_NOUNS));
pub static GENRE: LazyLock<Regex> = LazyLock::new(|| phrase_regex(tables::GENRES));
pub static CREATION_VERB: LazyLock<Regex> = LazyLock::new(|| phrase_regex(tables::CREATION_VERBS));
pub static CODE_WORD: LazyLock<Regex> = LazyLock::new(|| phrase_regex(tables::CODE_WORDS));
pub static EXPANSIVE: LazyLock<Regex> = LazyLock::new(|| phrase_regex(tables::EXPANSIVE_MARKERS));

static LANGUAGE_PATTERNS: LazyLock<Vec<(Regex, &'static Language)>> = LazyLock::new(|| {
    tables::LANGUAGES
        .iter()
        .map(|lang| (phrase_regex(lang.aliases), lang))
        .collect()
});

// ---------------------------------------------------------------------------
// Structural patterns
// ---------------------------------------------------------------------------

pub static WHY_TRIGGER: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\b(?:why|reasons?|explain why)\b"));
pub static WHY: LazyLock<Regex> = LazyLock::new(|| compile(r"\bwhy\b"));
pub static FAN_FICTION: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\bfan[\s-]?fic(?:tion|s)?\b|\bfanfiction\b"));
pub static TELL_A: LazyLock<Regex> = LazyLock::new(|| compile(r"\btell (?:me|us|my \w+) an?\b"));
pub static CREATIVE_SHORT: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\b(?:short|brief|quick|tiny|mini|flash fiction|micro)\b"));
pub static CREATIVE_LONG: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"\b(?:detailed|elaborate|long|lengthy|comprehensive|epic|multi-chapter|full-length)\b")
});
pub static TELL_ME_ABOUT: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"\btell (?:me|us) (?:all |more |a bit |a little |everything )?about\b")
});
pub static LIST_WORD: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"\b(?:list|lists|listing|enumerate|bullet points?|bulleted|top ten|checklist)\b")
});

static LINE_COUNT: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(?:^|[^\d.,])(\d{1,3}(?:,\d{3})+|\d+)\s*\+?\s*-?\s*(?:lines?|loc)\b")
});
static WORD_COUNT: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?:^|[^\d.,])(\d+)\s*-?\s*words?\b"));
static WORD_COUNT_OF: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\bword[\s-]?count\s*(?:of\s*|:\s*)?(\d+)\b"));
static PAGE_COUNT: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"(?:^|[^\d.,])\b(\d+(?:\.\d+)?|half a|one|two|three|four|five|six|seven|eight|nine|ten|a|an)\s*-?\s*pages?\b",
    )
});
static K_WORDS: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\b(\d+(?:\.\d+)?)\s*k\s*-?\s*words?\b"));
static GROUPED_WORDS: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\b(\d{1,3}(?:,\d{3})+)\s*-?\s*words?\b"));
static SPELLED_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    let quantities = tables::NUMBER_WORDS
        .iter()
        .map(|(w, _)| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    compile(&format!(
        r"\b(\d+|{quantities})\s+(hundred|thousand)[\s-]+words?\b"
    ))
});
static LIST_COUNT: LazyLock<Regex> = LazyLock::new(|| {
    let nouns = tables::LIST_NOUNS.join("|");
    compile(&format!(r"\b(\d+)\s+(?:[a-z'-]+\s+){{0,2}}?(?:{nouns})\b"))
});

// ---------------------------------------------------------------------------
// Simple factual queries
// ---------------------------------------------------------------------------

static YES_NO: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"^(?:is|are|was|were|am|do|does|did|can|could|will|would|should|has|have|had)\s+\S+.*\?$",
    )
});
static WH_QUESTION: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^(?:what|when|where|who|which)(?:'s|\s+is|\s+are|\s+was|\s+were|\s+did|\s+does)\b")
});
static NAME_N: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"^(?:name|list)\s+(?:the\s+)?(?:top\s+)?(\d+|one|two|three|four|five|six|seven|eight|nine|ten)\b",
    )
});
static CONVERSION: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"\bconvert\s+-?[\d.,]+|^-?[\d.,]+\s*[a-z°]+\s+(?:to|in|into)\s+[a-z°]+\s*\??$|\bhow many\s+[a-z]+\s+(?:are\s+)?in\s+(?:a|an|one|\d+)\b",
    )
});
static ARITHMETIC: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"^(?:what(?:'s|\s+is)\s+|calculate\s+|compute\s+)?-?\d+(?:\.\d+)?\s*(?:[-+*/x×÷^%]|times|plus|minus|divided by)\s*-?\d+(?:\.\d+)?\s*[?=]?$",
    )
});
static DEFINITION: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r#"^(?:define|definition of|meaning of|what does)\s+(?:the\s+word\s+)?["']?[a-z'-]+["']?(?:\s+mean)?\s*\??$"#,
    )
});

/// Shape of a short factual question.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FactualShape {
    /// "Name 5 rivers" with the requested count.
    Listing(f64),
    /// Yes/no, wh-question, conversion, arithmetic or definition.
    Answer,
}

/// Classify a short factual query, if the prompt is one.
pub fn factual_shape(lower: &str) -> Option<FactualShape> {
    let text = lower.trim();
    if let Some(caps) = NAME_N.captures(text) {
        return parse_quantity(&caps[1]).map(FactualShape::Listing);
    }
    let answer = [&*YES_NO, &*WH_QUESTION, &*CONVERSION, &*ARITHMETIC, &*DEFINITION]
        .iter()
        .any(|re| re.is_match(text));
    answer.then_some(FactualShape::Answer)
}

// ---------------------------------------------------------------------------
// Quantity extraction
// ---------------------------------------------------------------------------

/// Parse a digit string (with optional thousands separators) or a number
/// word into a value.
pub fn parse_quantity(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.starts_with(|c: char| c.is_ascii_digit()) {
        return raw.replace(',', "").parse::<f64>().ok();
    }
    if raw == "half a" {
        return Some(0.5);
    }
    tables::NUMBER_WORDS
        .iter()
        .find(|(w, _)| *w == raw)
        .map(|(_, n)| *n)
}

fn first_capture(re: &Regex, text: &str) -> Option<f64> {
    re.captures(text).and_then(|caps| parse_quantity(&caps[1]))
}

/// Number of lines requested ("50 lines", "a 200-line script").
pub fn line_count(lower: &str) -> Option<f64> {
    first_capture(&LINE_COUNT, lower)
}

/// Plain digit word count ("500 words", "a 300-word essay", "word count of 800").
pub fn word_count(lower: &str) -> Option<f64> {
    first_capture(&WORD_COUNT, lower).or_else(|| first_capture(&WORD_COUNT_OF, lower))
}

/// Page count ("3 pages", "a two-page memo", "half a page").
pub fn page_count(lower: &str) -> Option<f64> {
    first_capture(&PAGE_COUNT, lower)
}

/// Word counts written as "5k words", "5,000 words", "five thousand
/// words", "a thousand words" or "a few hundred words".
pub fn word_count_variant(lower: &str) -> Option<f64> {
    if let Some(k) = first_capture(&K_WORDS, lower) {
        return Some(k * 1000.0);
    }
    if let Some(n) = first_capture(&GROUPED_WORDS, lower) {
        return Some(n);
    }
    SPELLED_WORDS.captures(lower).and_then(|caps| {
        let quantity = parse_quantity(&caps[1])?;
        let unit = if &caps[2] == "thousand" { 1000.0 } else { 100.0 };
        Some(quantity * unit)
    })
}

/// Number of items in "10 tips", "5 creative ways", "7 reasons why".
pub fn list_count(lower: &str) -> Option<f64> {
    first_capture(&LIST_COUNT, lower)
}

/// The language mentioned earliest in the prompt, so both "50 lines of
/// python" and "a python script with 50 lines" resolve.
pub fn detect_language(lower: &str) -> Option<&'static Language> {
    LANGUAGE_PATTERNS
        .iter()
        .filter_map(|(re, lang)| re.find(lower).map(|m| (m.start(), *lang)))
        .min_by_key(|(pos, _)| *pos)
        .map(|(_, lang)| lang)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phrase_regex_requires_whole_words() {
        let re = phrase_regex(&["war", "c++"]);
        assert!(re.is_match("the war ended"));
        assert!(re.is_match("war"));
        assert!(!re.is_match("software"));
        assert!(re.is_match("write c++ code"));
    }

    #[test]
    fn factual_shapes() {
        assert_eq!(
            factual_shape("is paris the capital of france?"),
            Some(FactualShape::Answer)
        );
        assert_eq!(factual_shape("name 5 rivers in europe"), Some(FactualShape::Listing(5.0)));
        assert_eq!(factual_shape("list three colors"), Some(FactualShape::Listing(3.0)));
        assert_eq!(factual_shape("convert 5 km to miles"), Some(FactualShape::Answer));
        assert_eq!(factual_shape("12 * 7"), Some(FactualShape::Answer));
        assert_eq!(factual_shape("what's 3 plus 4?"), Some(FactualShape::Answer));
        assert_eq!(factual_shape("define serendipity"), Some(FactualShape::Answer));
        assert_eq!(factual_shape("how many cups in a gallon"), Some(FactualShape::Answer));
        assert_eq!(factual_shape("write me a poem"), None);
    }

    #[test]
    fn line_counts() {
        assert_eq!(line_count("write 50 lines of python"), Some(50.0));
        assert_eq!(line_count("a 200-line script"), Some(200.0));
        assert_eq!(line_count("1,500 lines of code"), Some(1500.0));
        assert_eq!(line_count("a few lines"), None);
    }

    #[test]
    fn word_counts() {
        assert_eq!(word_count("write a 500 word essay"), Some(500.0));
        assert_eq!(word_count("a 300-word summary"), Some(300.0));
        assert_eq!(word_count("keep it to a word count of 800"), Some(800.0));
        assert_eq!(word_count("write 5,000 words"), None);
        assert_eq!(word_count("5k words"), None);
    }

    #[test]
    fn word_count_variants() {
        assert_eq!(word_count_variant("a 5k word essay"), Some(5000.0));
        assert_eq!(word_count_variant("2.5k words"), Some(2500.0));
        assert_eq!(word_count_variant("write 5,000 words"), Some(5000.0));
        assert_eq!(word_count_variant("five thousand words on bees"), Some(5000.0));
        assert_eq!(word_count_variant("a thousand words"), Some(1000.0));
        assert_eq!(word_count_variant("a few hundred words"), Some(300.0));
        assert_eq!(word_count_variant("a couple of thousand words"), Some(2000.0));
        assert_eq!(word_count_variant("3 thousand words"), Some(3000.0));
        assert_eq!(word_count_variant("some words"), None);
    }

    #[test]
    fn page_counts() {
        assert_eq!(page_count("write 3 pages on bees"), Some(3.0));
        assert_eq!(page_count("a two-page memo"), Some(2.0));
        assert_eq!(page_count("half a page"), Some(0.5));
        assert_eq!(page_count("a page about cats"), Some(1.0));
    }

    #[test]
    fn list_counts() {
        assert_eq!(list_count("give me 10 tips for sleeping"), Some(10.0));
        assert_eq!(list_count("7 creative marketing ideas"), Some(7.0));
        assert_eq!(list_count("tips for sleeping"), None);
    }

    #[test]
    fn language_detection_in_either_order() {
        assert_eq!(detect_language("50 lines of python code").map(|l| l.name), Some("python"));
        assert_eq!(
            detect_language("a rust program with 200 lines").map(|l| l.name),
            Some("rust")
        );
        assert_eq!(detect_language("write c++ code").map(|l| l.name), Some("c++"));
        assert!(detect_language("let's go on an adventure").is_none());
        assert!(detect_language("30 lines of code").is_none());
    }
}
