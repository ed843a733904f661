//! Token counting for prompt analysis.
//!
//! Provides a trait-based architecture for token counting, with a word
//! heuristic as the default implementation and a character heuristic as
//! an alternative. Real tokenizers can be plugged in by implementing the
//! [`TokenCounter`] trait.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Trait (extensibility point)
// ---------------------------------------------------------------------------

/// Approximates the number of tokens a production tokenizer would emit.
///
/// Implementations must be deterministic: the same text always yields the
/// same count, and the empty string always counts as zero.
pub trait TokenCounter: Send + Sync {
    /// Count the tokens in `text`.
    fn count(&self, text: &str) -> usize;

    /// Short identifier of the heuristic, used in reports.
    fn name(&self) -> &str;
}

// ---------------------------------------------------------------------------
// Heuristic selection
// ---------------------------------------------------------------------------

/// Which built-in heuristic to use, selectable from config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerKind {
    /// ~1.3 tokens per whitespace-delimited word.
    #[default]
    Words,
    /// ~4 characters per token.
    Chars,
}

// ---------------------------------------------------------------------------
// Word-based counter
// ---------------------------------------------------------------------------

/// Token counter that scales the number of words by a fixed ratio.
///
/// Scripts written without spaces (CJK) would collapse into a single
/// "word", so every ideograph or kana character counts as its own unit.
#[derive(Debug, Clone)]
pub struct WordCounter {
    tokens_per_word: f64,
}

impl WordCounter {
    pub fn new(tokens_per_word: f64) -> Self {
        Self {
            tokens_per_word: if tokens_per_word.is_finite() && tokens_per_word > 0.0 {
                tokens_per_word
            } else {
                1.3
            },
        }
    }
}

impl Default for WordCounter {
    fn default() -> Self {
        Self::new(1.3)
    }
}

impl TokenCounter for WordCounter {
    fn count(&self, text: &str) -> usize {
        let units = word_units(text);
        if units == 0 {
            return 0;
        }
        (units as f64 * self.tokens_per_word).ceil() as usize
    }

    fn name(&self) -> &str {
        "words"
    }
}

/// Count word units: one per whitespace-delimited word, except that each
/// CJK character counts separately.
fn word_units(text: &str) -> usize {
    text.split_whitespace()
        .map(|word| {
            let wide = word.chars().filter(|c| is_cjk(*c)).count();
            if wide == 0 {
                1
            } else {
                let has_other = word.chars().any(|c| !is_cjk(c) && c.is_alphanumeric());
                wide + usize::from(has_other)
            }
        })
        .sum()
}

fn is_cjk(c: char) -> bool {
    matches!(c as u32,
        0x3040..=0x30FF   // hiragana, katakana
        | 0x3400..=0x4DBF // CJK extension A
        | 0x4E00..=0x9FFF // CJK unified ideographs
        | 0xAC00..=0xD7AF // hangul syllables
        | 0xF900..=0xFAFF)
}

// ---------------------------------------------------------------------------
// Character-based counter
// ---------------------------------------------------------------------------

/// Token counter that uses a character-count heuristic (~4 chars/token).
#[derive(Debug, Clone)]
pub struct CharCounter {
    chars_per_token: f64,
}

impl Default for CharCounter {
    fn default() -> Self {
        Self {
            chars_per_token: 4.0,
        }
    }
}

impl TokenCounter for CharCounter {
    fn count(&self, text: &str) -> usize {
        if text.is_empty() {
            return 0;
        }
        let chars = text.chars().count() as f64;
        (chars / self.chars_per_token).ceil() as usize
    }

    fn name(&self) -> &str {
        "chars"
    }
}

// ---------------------------------------------------------------------------
// Convenience functions
// ---------------------------------------------------------------------------

/// Build the counter for a configured heuristic.
pub fn counter_for(kind: TokenizerKind, tokens_per_word: f64) -> Box<dyn TokenCounter> {
    match kind {
        TokenizerKind::Words => Box::new(WordCounter::new(tokens_per_word)),
        TokenizerKind::Chars => Box::new(CharCounter::default()),
    }
}

/// Count tokens using the default word heuristic.
pub fn count_tokens(text: &str) -> usize {
    WordCounter::default().count(text)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
