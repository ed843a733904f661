//! Openness classification: how creative or open-ended a prompt is.
//!
//! Same two-tier structure as reasoning: [`HIGH_OPENNESS_PHRASES`] is
//! checked first and short-circuits to `High`, then
//! [`MEDIUM_OPENNESS_PHRASES`] yields `Medium`, and anything else is `Low`.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Tier, TieredKeywords};

/// Creative, generative, speculative, informal or subjective language.
pub const HIGH_OPENNESS_PHRASES: &[&str] = &[
    // creative writing
    "story",
    "stories",
    "poem",
    "poetry",
    "haiku",
    "limerick",
    "sonnet",
    "lyrics",
    "song about",
    "fiction",
    "fanfic",
    "fan fiction",
    "novel",
    "narrative",
    "screenplay",
    "short film",
    "fairy tale",
    "fable",
    "bedtime story",
    "dialogue between",
    "monologue",
    "character",
    "plot",
    "worldbuilding",
    "world-building",
    "fantasy",
    "sci-fi",
    "science fiction",
    "dystopia",
    "utopia",
    "mystery",
    "thriller",
    "horror",
    "romance",
    "adventure",
    "superhero",
    "dragon",
    "wizard",
    // generation verbs
    "imagine",
    "invent",
    "brainstorm",
    "come up with",
    "make up",
    "dream up",
    "create a",
    "create an",
    "compose",
    "generate ideas",
    "generate a",
    "design a logo",
    "slogan",
    "tagline",
    "catchphrase",
    "names for",
    "ideas for",
    "creative",
    "original",
    "roleplay",
    "role-play",
    "pretend",
    "act as",
    // hypothetical and speculative framing
    "what if",
    "what would happen",
    "hypothetical",
    "suppose",
    "imagine if",
    "in a world where",
    "alternate history",
    "alternative history",
    "speculate",
    "predict the future",
    "in the year 3000",
    "would you rather",
    "if you could",
    "if you were",
    // informal and cultural slang
    "lol",
    "lmao",
    "bruh",
    "vibe",
    "meme",
    "roast me",
    "roast my",
    "slay",
    "no cap",
    "rizz",
    "sus ",
    "yeet",
    "goat",
    "hot take",
    "shower thought",
    "fun fact",
    "joke",
    "a pun",
    "riddle",
    "funny",
    "hilarious",
    "silly",
    "weird",
    // subjective assessment
    "your opinion",
    "what do you think",
    "do you think",
    "your favorite",
    "your favourite",
    "how do you feel",
    "do you like",
    "would you",
    "best ever",
    "most beautiful",
    "most underrated",
    "overrated",
    "underrated",
    "rate my",
    "rank the",
    "which do you prefer",
    "what's your take",
    "your take on",
    "personal",
    "inspire",
    "motivational",
    "philosophical musing",
    "reflect on",
];

/// Explanatory, descriptive or procedural language.
pub const MEDIUM_OPENNESS_PHRASES: &[&str] = &[
    "explain",
    "describe",
    "discuss",
    "elaborate",
    "overview",
    "introduction to",
    "tell me about",
    "teach me",
    "help me understand",
    "what are the",
    "why do",
    "why does",
    "why is",
    "why are",
    "how does",
    "how do",
    "how can",
    "how to",
    "ways to",
    "tips",
    "advice",
    "suggest",
    "recommend",
    "guide",
    "steps to",
    "process of",
    "history of",
    "background on",
    "summary of",
    "summarize",
    "summarise",
    "outline",
    "essay",
    "article",
    "blog",
    "report",
    "review",
    "analysis",
    "analyze",
    "analyse",
    "compare",
    "contrast",
    "pros and cons",
    "advantages",
    "disadvantages",
    "benefits of",
    "impact of",
    "effects of",
    "causes of",
    "role of",
    "importance of",
    "significance of",
    "examples of",
    "give examples",
    "illustrate",
    "clarify",
    "interpret",
    "in detail",
    "in depth",
    "in-depth",
    "thoroughly",
    "walk me through",
    "break down",
    "expand on",
    "write about",
    "write a",
    "draft",
    "rewrite",
    "paraphrase",
    "translate",
    "a plan",
    "strategy",
    "approach",
    "explore",
    "investigate",
];

/// Openness level of a prompt.
///
/// Serialised as its numeric value (0, 1, 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum OpennessLevel {
    Low = 0,
    Medium = 1,
    High = 2,
}

impl OpennessLevel {
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for OpennessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<OpennessLevel> for u8 {
    fn from(level: OpennessLevel) -> Self {
        level.value()
    }
}

impl TryFrom<u8> for OpennessLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Low),
            1 => Ok(Self::Medium),
            2 => Ok(Self::High),
            other => Err(format!("invalid openness level {other}, expected 0-2")),
        }
    }
}

/// Classifies prompts by openness.
#[derive(Debug, Clone)]
pub struct OpennessClassifier {
    keywords: TieredKeywords,
}

impl OpennessClassifier {
    /// Extend the built-in tables with extra phrases.
    pub fn with_extra(high: &[String], medium: &[String]) -> Self {
        let mut classifier = Self::default();
        classifier.keywords.extend(high, medium);
        classifier
    }

    pub fn classify(&self, text: &str) -> OpennessLevel {
        match self.keywords.tier(text) {
            Tier::Upper => OpennessLevel::High,
            Tier::Lower => OpennessLevel::Medium,
            Tier::Unmatched => OpennessLevel::Low,
        }
    }

    /// The phrase that decided the classification, if any.
    pub fn matched_phrase<'a>(&'a self, text: &str) -> Option<&'a str> {
        self.keywords.first_match(text).map(|(_, p)| p)
    }
}

impl Default for OpennessClassifier {
    fn default() -> Self {
        Self {
            keywords: TieredKeywords::new(HIGH_OPENNESS_PHRASES, MEDIUM_OPENNESS_PHRASES),
        }
    }
}
