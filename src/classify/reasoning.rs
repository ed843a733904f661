//! Reasoning-level classification.
//!
//! A prompt is `Complex` if it mentions any phrase from [`COMPLEX_PHRASES`],
//! otherwise `Moderate` if it mentions any phrase from
//! [`MODERATE_PHRASES`], otherwise `Simple`. Complex is checked first, so
//! complexity dominates when both tiers match.
//!
//! Matching is plain substring containment. Short phrases nested inside
//! longer words ("ethic" in "prosthetic") can fire; that is a known
//! limitation of the heuristic.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Tier, TieredKeywords};

/// Phrases that indicate multi-step or abstract reasoning.
pub const COMPLEX_PHRASES: &[&str] = &[
    // philosophy
    "philosophy",
    "philosophical",
    "epistemolog",
    "metaphysic",
    "ontolog",
    "phenomenolog",
    "existential",
    "free will",
    "determinism",
    "consciousness",
    "meaning of life",
    "nature of reality",
    "mind-body",
    "utilitarian",
    "deontolog",
    "virtue ethics",
    "categorical imperative",
    "nihilism",
    "stoicism",
    "dialectic",
    "hermeneutic",
    "teleolog",
    "moral dilemma",
    "trolley problem",
    "thought experiment",
    // ethics
    "ethical implications",
    "ethics of",
    "moral implications",
    "moral philosophy",
    "bioethics",
    "ai alignment",
    "ai safety",
    "algorithmic bias",
    "informed consent",
    // advanced computer science and machine learning
    "machine learning",
    "deep learning",
    "neural network",
    "transformer architecture",
    "attention mechanism",
    "backpropagation",
    "gradient descent",
    "reinforcement learning",
    "generative adversarial",
    "convolutional",
    "recurrent neural",
    "large language model",
    "fine-tuning",
    "hyperparameter",
    "overfitting",
    "regularization",
    "embedding space",
    "latent space",
    "bayesian",
    "stochastic",
    "markov chain",
    "monte carlo",
    "computational complexity",
    "np-complete",
    "np-hard",
    "time complexity",
    "big o notation",
    "dynamic programming",
    "graph theory",
    "formal verification",
    "type theory",
    "lambda calculus",
    "category theory",
    "compiler design",
    "quantum computing",
    "quantum mechanics",
    "cryptograph",
    "zero-knowledge",
    "homomorphic",
    "consensus algorithm",
    "byzantine fault",
    "distributed consensus",
    // research methodology
    "research methodology",
    "research design",
    "literature review",
    "meta-analysis",
    "systematic review",
    "hypothesis testing",
    "statistical significance",
    "regression analysis",
    "causal inference",
    "confounding",
    "randomized controlled",
    "peer review",
    "empirical evidence",
    "theoretical framework",
    "epidemiolog",
    "longitudinal study",
    "qualitative research",
    "quantitative research",
    // system design
    "system design",
    "system architecture",
    "distributed system",
    "microservice",
    "scalability",
    "fault tolerance",
    "high availability",
    "load balancing",
    "eventual consistency",
    "cap theorem",
    "sharding",
    "event sourcing",
    "message queue",
    "concurrency control",
    "race condition",
    "deadlock",
    "memory model",
    "design trade-off",
    "architectural trade",
    // security
    "threat model",
    "vulnerabilit",
    "penetration test",
    "exploit",
    "attack surface",
    "zero-day",
    "privilege escalation",
    "side-channel",
    "buffer overflow",
    "sql injection",
    "cross-site scripting",
    "authentication protocol",
    "public key infrastructure",
    "security audit",
    // social and political theory
    "political theory",
    "political philosophy",
    "social contract",
    "critical theory",
    "postmodern",
    "post-structural",
    "marxis",
    "hegemony",
    "geopolitic",
    "game theory",
    "macroeconomic",
    "monetary policy",
    "fiscal policy",
    "institutional",
    "sociolog",
    "anthropolog",
    "colonialism",
    "systemic racism",
    "intersectional",
    "social justice",
    "comparative analysis",
    "implications of",
    "long-term consequences",
    "second-order effects",
    "critically evaluate",
    "critically analyze",
    "critically analyse",
    "synthesize",
    "derive the",
    "prove that",
    "formal proof",
];

/// Phrases that indicate procedural or applied reasoning.
pub const MODERATE_PHRASES: &[&str] = &[
    // how-to and instructions
    "how to",
    "how do i",
    "how can i",
    "how should i",
    "how does",
    "step by step",
    "step-by-step",
    "instructions",
    "tutorial",
    "walk me through",
    "guide to",
    "best way to",
    "best practices",
    "tips for",
    "set up",
    "setup",
    "install",
    "configure",
    "troubleshoot",
    "fix the",
    "debug",
    // comparisons
    "compare",
    "comparison",
    "difference between",
    "differences between",
    " versus ",
    " vs ",
    " vs. ",
    "pros and cons",
    "advantages and disadvantages",
    "which is better",
    "similarities",
    "contrast",
    // implementation and coding
    "implement",
    "write a function",
    "write code",
    "write a script",
    "write a program",
    "refactor",
    "optimize",
    "optimise",
    "algorithm",
    "function that",
    "class that",
    "unit test",
    "api endpoint",
    "database",
    "query",
    "schema",
    "regex",
    "python",
    "javascript",
    "typescript",
    "java ",
    "rust ",
    "golang",
    "c++",
    "html",
    "css",
    "react",
    "docker",
    "kubernetes",
    "git ",
    "compile",
    "deploy",
    "parse",
    "convert this",
    "translate this",
    // explanation and analysis
    "explain",
    "analyze",
    "analyse",
    "analysis",
    "evaluate",
    "summarize",
    "summarise",
    "outline",
    "break down",
    "describe how",
    "what causes",
    "what are the benefits",
    "what are the risks",
    "calculate",
    "estimate",
    "solve",
    "equation",
    "formula",
    "interpret",
    // business and technical documentation
    "business plan",
    "marketing strategy",
    "project plan",
    "proposal",
    "requirements",
    "specification",
    "documentation",
    "report on",
    "case study",
    "budget",
    "forecast",
    "roadmap",
    "stakeholder",
    "kpi",
    "swot",
    "market research",
    "competitive analysis",
    "user story",
    "product requirements",
    "technical design",
    "workflow",
    "process improvement",
    "cover letter",
    "resume",
    "presentation",
    "spreadsheet",
    "invoice",
    "contract",
    "policy document",
    "meeting notes",
    "executive summary",
    "strategy",
    "plan for",
    "recommend",
    "recommendation",
    "review my",
    "feedback on",
    "improve my",
    "edit my",
    "proofread",
];

/// Reasoning level of a prompt.
///
/// Serialised as its numeric value (1, 2, 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ReasoningLevel {
    Simple = 1,
    Moderate = 2,
    Complex = 3,
}

impl ReasoningLevel {
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Simple => "Simple",
            Self::Moderate => "Moderate",
            Self::Complex => "Complex",
        }
    }
}

impl fmt::Display for ReasoningLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<ReasoningLevel> for u8 {
    fn from(level: ReasoningLevel) -> Self {
        level.value()
    }
}

impl TryFrom<u8> for ReasoningLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Simple),
            2 => Ok(Self::Moderate),
            3 => Ok(Self::Complex),
            other => Err(format!("invalid reasoning level {other}, expected 1-3")),
        }
    }
}

/// Classifies prompts by reasoning level.
#[derive(Debug, Clone)]
pub struct ReasoningClassifier {
    keywords: TieredKeywords,
}

impl ReasoningClassifier {
    /// Extend the built-in tables with extra phrases.
    pub fn with_extra(complex: &[String], moderate: &[String]) -> Self {
        let mut classifier = Self::default();
        classifier.keywords.extend(complex, moderate);
        classifier
    }

    pub fn classify(&self, text: &str) -> ReasoningLevel {
        match self.keywords.tier(text) {
            Tier::Upper => ReasoningLevel::Complex,
            Tier::Lower => ReasoningLevel::Moderate,
            Tier::Unmatched => ReasoningLevel::Simple,
        }
    }

    /// The phrase that decided the classification, if any.
    pub fn matched_phrase<'a>(&'a self, text: &str) -> Option<&'a str> {
        self.keywords.first_match(text).map(|(_, p)| p)
    }
}

impl Default for ReasoningClassifier {
    fn default() -> Self {
        Self {
            keywords: TieredKeywords::new(COMPLEX_PHRASES, MODERATE_PHRASES),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> ReasoningLevel {
        ReasoningClassifier::default().classify(text)
    }

    #[test]
    fn factual_question_is_simple() {
        assert_eq!(classify("Is Paris the capital of France?"), ReasoningLevel::Simple);
        assert_eq!(classify("hello"), ReasoningLevel::Simple);
        assert_eq!(classify(""), ReasoningLevel::Simple);
    }

    #[test]
    fn how_to_is_moderate() {
        assert_eq!(classify("How to bake sourdough bread"), ReasoningLevel::Moderate);
        assert_eq!(
            classify("What is the difference between a cat and a dog?"),
            ReasoningLevel::Moderate
        );
    }

    #[test]
    fn philosophy_is_complex() {
        assert_eq!(
            classify("Discuss free will versus determinism"),
            ReasoningLevel::Complex
        );
        assert_eq!(
            classify("Design a distributed system for payments"),
            ReasoningLevel::Complex
        );
    }

    #[test]
    fn complex_dominates_moderate() {
        let text = "Explain step by step how to compare machine learning frameworks, \
                    write code, and summarize the tutorial";
        assert_eq!(classify(text), ReasoningLevel::Complex);
        let c = ReasoningClassifier::default();
        assert_eq!(c.matched_phrase(text), Some("machine learning"));
    }

    #[test]
    fn case_insensitive() {
        for text in [
            "HOW TO tie a tie",
            "Explain GAME THEORY",
            "Is Paris The Capital?",
            "NEURAL NETWORK basics",
        ] {
            assert_eq!(classify(text), classify(&text.to_lowercase()), "{text}");
        }
    }

    #[test]
    fn idempotent() {
        let text = "Compare Rust and Go for backend services";
        assert_eq!(classify(text), classify(text));
    }

    #[test]
    fn extra_phrases_extend_tables() {
        let c = ReasoningClassifier::with_extra(&["sourdough".to_string()], &[]);
        assert_eq!(c.classify("How to bake sourdough bread"), ReasoningLevel::Complex);
    }

    #[test]
    fn tables_are_lowercase_and_non_empty() {
        for phrase in COMPLEX_PHRASES.iter().chain(MODERATE_PHRASES) {
            assert!(!phrase.trim().is_empty());
            assert_eq!(*phrase, phrase.to_lowercase());
        }
    }

    #[test]
    fn level_serialises_as_number() {
        let json = serde_json::to_string(&ReasoningLevel::Moderate).unwrap();
        assert_eq!(json, "2");
        let parsed: ReasoningLevel = serde_json::from_str("3").unwrap();
        assert_eq!(parsed, ReasoningLevel::Complex);
        assert!(serde_json::from_str::<ReasoningLevel>("7").is_err());
    }
}
