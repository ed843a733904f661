//! Prompt classifiers.
//!
//! Three independent analyzers operate on the raw prompt text:
//! - [`vocabulary`]: readability-based vocabulary complexity in `[0, 1]`
//! - [`reasoning`]: Simple / Moderate / Complex reasoning level
//! - [`openness`]: Low / Medium / High creative openness
//!
//! The reasoning and openness classifiers share [`TieredKeywords`]: two
//! ordered phrase lists matched by case-insensitive substring containment.
//! The upper tier is always tested first and short-circuits, so a prompt
//! that contains phrases from both tiers lands in the upper tier.

pub mod openness;
pub mod reasoning;
pub mod vocabulary;

pub use openness::{OpennessClassifier, OpennessLevel};
pub use reasoning::{ReasoningClassifier, ReasoningLevel};
pub use vocabulary::vocabulary_complexity;

/// Which tier of a [`TieredKeywords`] table matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Upper,
    Lower,
    Unmatched,
}

/// Two ordered lists of lowercase phrases.
///
/// Phrases are data, not control flow: tables can be extended from config
/// and tested independently of the matching rule.
#[derive(Debug, Clone)]
pub struct TieredKeywords {
    upper: Vec<String>,
    lower: Vec<String>,
}

impl TieredKeywords {
    pub fn new(upper: &[&str], lower: &[&str]) -> Self {
        Self {
            upper: upper.iter().map(|p| p.to_lowercase()).collect(),
            lower: lower.iter().map(|p| p.to_lowercase()).collect(),
        }
    }

    /// Append extra phrases to each tier. Blank phrases are ignored since
    /// they would match every prompt.
    pub fn extend(&mut self, upper: &[String], lower: &[String]) {
        let clean = |p: &String| {
            let p = p.trim().to_lowercase();
            (!p.is_empty()).then_some(p)
        };
        self.upper.extend(upper.iter().filter_map(clean));
        self.lower.extend(lower.iter().filter_map(clean));
    }

    /// Find the first phrase that matches, upper tier first.
    pub fn first_match(&self, text: &str) -> Option<(Tier, &str)> {
        let lower_text = text.to_lowercase();
        if let Some(p) = self.upper.iter().find(|p| lower_text.contains(p.as_str())) {
            return Some((Tier::Upper, p.as_str()));
        }
        self.lower
            .iter()
            .find(|p| lower_text.contains(p.as_str()))
            .map(|p| (Tier::Lower, p.as_str()))
    }

    /// Classify `text` into a tier.
    pub fn tier(&self, text: &str) -> Tier {
        self.first_match(text).map_or(Tier::Unmatched, |(t, _)| t)
    }

    pub fn upper(&self) -> &[String] {
        &self.upper
    }

    pub fn lower(&self) -> &[String] {
        &self.lower
    }
}
