//! Response-length estimation.
//!
//! Predicts how many tokens a model will spend answering a prompt. The
//! estimator is an ordered decision table of [`Rule`]s: each rule either
//! declines (`None`) or produces a raw estimate, and the first rule that
//! produces one decides the result. Later rules assume earlier ones have
//! been ruled out, so [`RULES`] must stay in this order:
//!
//! 1. simple factual query
//! 2. code request with a line count
//! 3. socio-political "why" question
//! 4. socio-political topic
//! 5. creative writing
//! 6. line count (any content)
//! 7. word count
//! 8. page count
//! 9. "tell me about"
//! 10. content type
//! 11. word count variants ("5k", "five thousand")
//! 12. style modifiers
//! 13. list generation
//! 14. bare "why" question
//! 15. fallback
//!
//! Every result is floored at [`EstimatorConfig::min_response_tokens`].

pub mod content;
pub mod patterns;
pub mod tables;

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EstimatorConfig;

use self::patterns::FactualShape;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Which family of the cascade produced an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleKind {
    Empty,
    SimpleFactual,
    CodeLines,
    PoliticalWhy,
    PoliticalTopic,
    CreativeWriting,
    LineCount,
    WordCount,
    PageCount,
    TellMeAbout,
    ContentType,
    WordCountVariant,
    StyleModifier,
    ListGeneration,
    WhyQuestion,
    Fallback,
}

impl RuleKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Empty => "empty prompt",
            Self::SimpleFactual => "simple factual query",
            Self::CodeLines => "code with line count",
            Self::PoliticalWhy => "socio-political why question",
            Self::PoliticalTopic => "socio-political topic",
            Self::CreativeWriting => "creative writing",
            Self::LineCount => "line count",
            Self::WordCount => "word count",
            Self::PageCount => "page count",
            Self::TellMeAbout => "tell me about",
            Self::ContentType => "content type",
            Self::WordCountVariant => "word count variant",
            Self::StyleModifier => "style modifiers",
            Self::ListGeneration => "list generation",
            Self::WhyQuestion => "why question",
            Self::Fallback => "fallback",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A predicted response length and the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseEstimate {
    pub tokens: usize,
    pub rule: RuleKind,
}

/// A prompt prepared for rule evaluation.
#[derive(Debug)]
pub struct Prompt<'a> {
    /// Lowercased, trimmed prompt text.
    pub lower: String,
    pub prompt_tokens: f64,
    pub word_count: usize,
    pub config: &'a EstimatorConfig,
}

/// One step of the cascade: returns a raw estimate when it applies.
pub struct Rule {
    pub kind: RuleKind,
    pub evaluate: fn(&Prompt<'_>) -> Option<f64>,
}

/// The cascade, highest priority first.
pub const RULES: &[Rule] = &[
    Rule { kind: RuleKind::SimpleFactual, evaluate: simple_factual },
    Rule { kind: RuleKind::CodeLines, evaluate: code_lines },
    Rule { kind: RuleKind::PoliticalWhy, evaluate: political_why },
    Rule { kind: RuleKind::PoliticalTopic, evaluate: political_topic },
    Rule { kind: RuleKind::CreativeWriting, evaluate: creative_writing },
    Rule { kind: RuleKind::LineCount, evaluate: generic_lines },
    Rule { kind: RuleKind::WordCount, evaluate: word_count },
    Rule { kind: RuleKind::PageCount, evaluate: page_count },
    Rule { kind: RuleKind::TellMeAbout, evaluate: tell_me_about },
    Rule { kind: RuleKind::ContentType, evaluate: content_type },
    Rule { kind: RuleKind::WordCountVariant, evaluate: word_count_variant },
    Rule { kind: RuleKind::StyleModifier, evaluate: style_modifiers },
    Rule { kind: RuleKind::ListGeneration, evaluate: list_generation },
    Rule { kind: RuleKind::WhyQuestion, evaluate: why_question },
    Rule { kind: RuleKind::Fallback, evaluate: fallback },
];

// ---------------------------------------------------------------------------
// Estimator
// ---------------------------------------------------------------------------

/// Predicts response token counts. Total over all inputs: never errors,
/// never returns less than the configured floor.
#[derive(Debug, Clone, Default)]
pub struct ResponseEstimator {
    config: EstimatorConfig,
}

impl ResponseEstimator {
    pub fn new(config: EstimatorConfig) -> Self {
        Self { config }
    }

    /// Estimate the response length for `text`, whose own token count is
    /// `prompt_tokens`.
    pub fn estimate(&self, text: &str, prompt_tokens: usize) -> ResponseEstimate {
        let floor = self.config.min_response_tokens.max(1);
        let lower = text.trim().to_lowercase();
        if lower.is_empty() {
            return ResponseEstimate {
                tokens: floor,
                rule: RuleKind::Empty,
            };
        }

        let prompt = Prompt {
            word_count: lower.split_whitespace().count(),
            lower,
            prompt_tokens: prompt_tokens as f64,
            config: &self.config,
        };

        let (raw, rule) = RULES
            .iter()
            .find_map(|rule| (rule.evaluate)(&prompt).map(|raw| (raw, rule.kind)))
            .unwrap_or((0.0, RuleKind::Fallback));

        let tokens = to_tokens(raw).max(floor);
        debug!(rule = %rule, tokens, "estimated response length");
        ResponseEstimate { tokens, rule }
    }
}

/// Float casts saturate, so `+inf` maps to `usize::MAX` rather than 0.
fn to_tokens(raw: f64) -> usize {
    if raw.is_nan() || raw <= 0.0 {
        0
    } else {
        raw.round() as usize
    }
}

/// Explicit counts parse to `f64` and may overflow to `+inf`.
fn capped(raw: f64, p: &Prompt<'_>) -> f64 {
    raw.min(p.config.count_token_ceiling as f64)
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// Longest prompt still considered a quick factual question.
const SIMPLE_MAX_WORDS: usize = 15;

fn simple_factual(p: &Prompt<'_>) -> Option<f64> {
    if p.word_count > SIMPLE_MAX_WORDS
        || patterns::CREATION_VERB.is_match(&p.lower)
        || patterns::EXPANSIVE.is_match(&p.lower)
    {
        return None;
    }
    match patterns::factual_shape(&p.lower)? {
        FactualShape::Listing(n) if n <= 10.0 => Some((n * 10.0).max(15.0)),
        FactualShape::Listing(n) => Some((100.0 + (n - 10.0) * 5.0).min(600.0)),
        FactualShape::Answer => Some((p.prompt_tokens * 1.2).max(20.0)),
    }
}

fn code_lines(p: &Prompt<'_>) -> Option<f64> {
    let lines = patterns::line_count(&p.lower)?;
    let language = patterns::detect_language(&p.lower);
    if language.is_none() && !patterns::CODE_WORD.is_match(&p.lower) {
        return None;
    }
    let per_line = language.map_or(tables::DEFAULT_TOKENS_PER_LINE, |l| l.tokens_per_line);
    let raw = lines * per_line * p.config.code_overhead;
    Some(raw.min(p.config.code_token_ceiling as f64))
}

fn political_why(p: &Prompt<'_>) -> Option<f64> {
    (patterns::WHY_TRIGGER.is_match(&p.lower) && patterns::SOCIO_POLITICAL.is_match(&p.lower))
        .then(|| (p.prompt_tokens * 5.0).max(200.0))
}

fn political_topic(p: &Prompt<'_>) -> Option<f64> {
    if !patterns::SOCIO_POLITICAL.is_match(&p.lower) {
        return None;
    }
    if patterns::OPINION.is_match(&p.lower) {
        Some((p.prompt_tokens * 4.5).max(180.0))
    } else {
        Some((p.prompt_tokens * 4.0).max(150.0))
    }
}

fn creative_writing(p: &Prompt<'_>) -> Option<f64> {
    let text = &p.lower;
    let fan_fiction = patterns::FAN_FICTION.is_match(text);
    let asked = patterns::CREATION_VERB.is_match(text) || patterns::TELL_A.is_match(text);
    let creative = fan_fiction
        || (asked && patterns::CREATIVE_NOUN.is_match(text))
        || (patterns::CREATION_VERB.is_match(text) && patterns::GENRE.is_match(text));
    if !creative {
        return None;
    }

    let t = p.prompt_tokens;
    Some(if fan_fiction {
        (t * 15.0).max(2000.0)
    } else if patterns::CREATIVE_SHORT.is_match(text) {
        (t * 5.0).max(300.0)
    } else if patterns::CREATIVE_LONG.is_match(text) {
        (t * 10.0).max(1000.0)
    } else {
        (t * 7.0).max(500.0)
    })
}

fn generic_lines(p: &Prompt<'_>) -> Option<f64> {
    let lines = patterns::line_count(&p.lower)?;
    let raw = lines * tables::PROSE_TOKENS_PER_LINE * p.config.code_overhead;
    Some(raw.min(p.config.line_token_ceiling as f64))
}

fn word_count(p: &Prompt<'_>) -> Option<f64> {
    patterns::word_count(&p.lower).map(|words| capped(words * p.config.tokens_per_word, p))
}

fn page_count(p: &Prompt<'_>) -> Option<f64> {
    patterns::page_count(&p.lower).map(|pages| {
        capped(
            pages * p.config.words_per_page as f64 * p.config.tokens_per_word,
            p,
        )
    })
}

fn tell_me_about(p: &Prompt<'_>) -> Option<f64> {
    patterns::TELL_ME_ABOUT
        .is_match(&p.lower)
        .then(|| (p.prompt_tokens * 3.5).max(120.0))
}

/// Content types yield to explicit word quantities so that "a 5k word
/// essay" is sized by its word count rather than by "essay".
fn content_type(p: &Prompt<'_>) -> Option<f64> {
    if patterns::word_count_variant(&p.lower).is_some() {
        return None;
    }
    let found = content::match_content_type(&p.lower)?;
    debug!(
        content_type = found.content_type,
        context = %found.context,
        "matched content type"
    );
    Some(found.tokens as f64)
}

fn word_count_variant(p: &Prompt<'_>) -> Option<f64> {
    patterns::word_count_variant(&p.lower)
        .map(|words| capped(words * p.config.tokens_per_word, p))
}

fn style_modifiers(p: &Prompt<'_>) -> Option<f64> {
    let multiplier = style_multiplier(&p.lower)?;
    Some((p.prompt_tokens * 3.0).max(200.0) * multiplier)
}

static STYLE_PATTERNS: LazyLock<Vec<(Regex, f64)>> = LazyLock::new(|| {
    tables::STYLE_MODIFIERS
        .iter()
        .map(|&(phrase, factor)| (patterns::phrase_regex(&[phrase]), factor))
        .collect()
});

/// Product of every style modifier present, or `None` if there are none.
///
/// Matched phrases are blanked out of a working copy so a longer phrase
/// ("very detailed") is not counted again by a shorter one ("detailed").
pub fn style_multiplier(lower: &str) -> Option<f64> {
    let mut remaining = lower.to_string();
    let mut product = 1.0;
    let mut matched = false;
    for (re, factor) in STYLE_PATTERNS.iter() {
        if let Some(m) = re.find(&remaining) {
            let range = m.range();
            remaining.replace_range(range.clone(), &" ".repeat(range.len()));
            product *= factor;
            matched = true;
        }
    }
    matched.then_some(product)
}

fn list_generation(p: &Prompt<'_>) -> Option<f64> {
    if let Some(n) = patterns::list_count(&p.lower) {
        return Some(capped(n * 50.0 + 200.0, p));
    }
    patterns::LIST_WORD.is_match(&p.lower).then_some(500.0)
}

fn why_question(p: &Prompt<'_>) -> Option<f64> {
    patterns::WHY
        .is_match(&p.lower)
        .then(|| (p.prompt_tokens * 3.5).max(130.0))
}

fn fallback(p: &Prompt<'_>) -> Option<f64> {
    let base = if patterns::CREATION_VERB.is_match(&p.lower) {
        (p.prompt_tokens * 3.0).max(300.0)
    } else {
        (p.prompt_tokens * 1.5).max(100.0)
    };
    let nudges: [(&str, f64); 4] = [
        ("explain", 1.3),
        ("detail", 1.3),
        ("compare", 1.4),
        ("analy", 1.5),
    ];
    let factor: f64 = nudges
        .iter()
        .filter(|(stem, _)| p.lower.contains(stem))
        .map(|(_, f)| f)
        .product();
    Some(base * factor)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::count_tokens;

    fn estimate(text: &str) -> ResponseEstimate {
        ResponseEstimator::default().estimate(text, count_tokens(text))
    }

    #[test]
    fn factual_question_is_short() {
        let e = estimate("Is Paris the capital of France?");
        assert_eq!(e.rule, RuleKind::SimpleFactual);
        assert!(e.tokens < 50, "got {}", e.tokens);
    }

    #[test]
    fn name_n_things_scales_with_n() {
        assert_eq!(estimate("Name 5 rivers in Europe").tokens, 50);
        assert_eq!(estimate("List 3 primary colors").tokens, 30);
        assert_eq!(estimate("Name 20 countries in Africa").tokens, 150);
    }

    #[test]
    fn code_with_line_count_uses_language_rate() {
        let e = estimate("Write 50 lines of Python code to scrape a website");
        assert_eq!(e.rule, RuleKind::CodeLines);
        assert!((50 * 30..=50 * 40).contains(&e.tokens), "got {}", e.tokens);
        assert_eq!(e.tokens, 1680);
    }

    #[test]
    fn code_language_may_follow_line_count() {
        let before = estimate("Write a Rust program with 100 lines");
        let after = estimate("Write 100 lines of Rust");
        assert_eq!(before.rule, RuleKind::CodeLines);
        assert_eq!(before.tokens, after.tokens);
        assert_eq!(before.tokens, 4080);
    }

    #[test]
    fn code_without_language_uses_default_rate() {
        assert_eq!(estimate("Write 10 lines of code").tokens, 360);
    }

    #[test]
    fn code_is_capped() {
        let e = estimate("Write 100000 lines of Java code");
        assert_eq!(e.tokens, 120_000);
    }

    #[test]
    fn political_why_question() {
        let e = estimate("Why do governments raise taxes during a recession?");
        assert_eq!(e.rule, RuleKind::PoliticalWhy);
        assert_eq!(e.tokens, 200);
    }

    #[test]
    fn political_topic_with_and_without_opinion() {
        let opinion = estimate("I believe the minimum wage should rise");
        assert_eq!(opinion.rule, RuleKind::PoliticalTopic);
        assert_eq!(opinion.tokens, 180);
        let neutral = estimate("Summarize the history of NATO");
        assert_eq!(neutral.rule, RuleKind::PoliticalTopic);
        assert_eq!(neutral.tokens, 150);
    }

    #[test]
    fn fan_fiction_is_long() {
        let e = estimate("Write a Harry Potter fanfic where Harry and Hermione go on an adventure");
        assert_eq!(e.rule, RuleKind::CreativeWriting);
        assert!(e.tokens > 1000, "got {}", e.tokens);
    }

    #[test]
    fn creative_sub_indicators() {
        assert_eq!(estimate("Write a short story about a lonely robot").tokens, 300);
        assert_eq!(estimate("Write a detailed fantasy story about dragons").tokens, 1000);
        assert_eq!(estimate("Tell me a story about a brave knight").tokens, 500);
    }

    #[test]
    fn generic_line_count() {
        let e = estimate("Write a 14 line sonnet about the sea");
        assert_eq!(e.rule, RuleKind::LineCount);
        assert_eq!(e.tokens, 202);
    }

    #[test]
    fn word_count_request() {
        let e = estimate("Write a 500 word essay about renewable energy");
        assert_eq!(e.rule, RuleKind::WordCount);
        let expected = 500.0 * 1.3;
        assert!((e.tokens as f64 - expected).abs() <= expected * 0.1);
    }

    #[test]
    fn page_count_request() {
        let e = estimate("Write 2 pages on the water cycle");
        assert_eq!(e.rule, RuleKind::PageCount);
        assert_eq!(e.tokens, 1300);
    }

    #[test]
    fn tell_me_about() {
        let e = estimate("Tell me about the Great Barrier Reef");
        assert_eq!(e.rule, RuleKind::TellMeAbout);
        assert_eq!(e.tokens, 120);
    }

    #[test]
    fn content_type_lookup() {
        let e = estimate("Write a haiku about autumn leaves");
        assert_eq!(e.rule, RuleKind::ContentType);
        assert_eq!(e.tokens, 30);
        assert_eq!(estimate("Draft a cover letter for a barista job").tokens, 450);
    }

    #[test]
    fn word_count_variants_beat_content_types() {
        let e = estimate("Write a 5k word essay on bees");
        assert_eq!(e.rule, RuleKind::WordCountVariant);
        assert_eq!(e.tokens, 6500);
        assert_eq!(estimate("Write five thousand words on bees").tokens, 6500);
        assert_eq!(estimate("Give me a few hundred words on bees").tokens, 390);
    }

    #[test]
    fn style_modifiers_are_cumulative() {
        let e = estimate("Give a detailed and thorough breakdown of photosynthesis");
        assert_eq!(e.rule, RuleKind::StyleModifier);
        // base max(tokens * 3, 200) = 200, then 1.5 * 1.5
        assert_eq!(e.tokens, 450);
    }

    #[test]
    fn longer_modifier_consumes_shorter() {
        assert_eq!(style_multiplier("a very detailed answer"), Some(2.0));
        assert_eq!(style_multiplier("be concise"), Some(0.6));
        assert_eq!(style_multiplier("plain request"), None);
    }

    #[test]
    fn list_generation() {
        let e = estimate("Give me 10 tips for better sleep");
        assert_eq!(e.rule, RuleKind::ListGeneration);
        assert_eq!(e.tokens, 700);
        let flat = estimate("Enumerate the planets in order");
        assert_eq!(flat.rule, RuleKind::ListGeneration);
        assert_eq!(flat.tokens, 500);
    }

    #[test]
    fn huge_counts_saturate_at_ceiling() {
        let ceiling = EstimatorConfig::default().count_token_ceiling;
        let nines = "9".repeat(400);
        for (text, rule) in [
            (format!("Write a {nines} word essay"), RuleKind::WordCount),
            (
                "Write a 18446744073709551616 word essay".to_string(),
                RuleKind::WordCount,
            ),
            (format!("Write {nines} pages"), RuleKind::PageCount),
            (format!("Give me {nines} tips"), RuleKind::ListGeneration),
        ] {
            let e = estimate(&text);
            assert_eq!(e.rule, rule, "{text}");
            assert_eq!(e.tokens, ceiling, "{text}");
        }
    }

    #[test]
    fn counts_grow_until_ceiling() {
        let small = estimate("Write a 1000 word essay").tokens;
        let large = estimate("Write a 50000 word essay").tokens;
        let huge = estimate("Write a 10000000 word essay").tokens;
        assert!(small < large && large <= huge);
        assert_eq!(huge, EstimatorConfig::default().count_token_ceiling);
    }

    #[test]
    fn bare_why_question() {
        let e = estimate("Why is the sky blue during the day but red at sunset in summer and winter months?");
        assert_eq!(e.rule, RuleKind::WhyQuestion);
        assert!(e.tokens >= 130);
    }

    #[test]
    fn fallback_paths() {
        let e = estimate("hello");
        assert_eq!(e.rule, RuleKind::Fallback);
        assert_eq!(e.tokens, 100);
        let create = estimate("Create a logo concept for my bakery");
        assert_eq!(create.rule, RuleKind::Fallback);
        assert_eq!(create.tokens, 300);
        let nudged = estimate("Please explain photosynthesis to me");
        assert_eq!(nudged.rule, RuleKind::Fallback);
        assert_eq!(nudged.tokens, 130);
    }

    #[test]
    fn empty_prompt_returns_floor() {
        let e = estimate("");
        assert_eq!(e.rule, RuleKind::Empty);
        assert_eq!(e.tokens, EstimatorConfig::default().min_response_tokens);
        assert_eq!(estimate("   \n").rule, RuleKind::Empty);
    }

    #[test]
    fn never_below_floor() {
        let floor = EstimatorConfig::default().min_response_tokens;
        for text in [
            "a",
            "?",
            "0 lines of code",
            "write 0 words",
            "summarize in one sentence",
            "12 * 7",
            "🦀🦀🦀",
            "Write a 1 word answer",
        ] {
            assert!(estimate(text).tokens >= floor, "{text}");
        }
    }

    #[test]
    fn deterministic() {
        let text = "Write a detailed essay about the ethics of AI";
        assert_eq!(estimate(text), estimate(text));
    }

    #[test]
    fn custom_floor() {
        let estimator = ResponseEstimator::new(EstimatorConfig {
            min_response_tokens: 250,
            ..EstimatorConfig::default()
        });
        assert_eq!(estimator.estimate("hello", 2).tokens, 250);
    }
}
