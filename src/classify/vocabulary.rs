//! Vocabulary complexity from a Flesch-Kincaid grade level.
//!
//! The grade is normalised against a ceiling of grade 12 and clamped to
//! `[0, 1]`. Inputs with fewer than two words have no meaningful grade
//! and score `0.0`.

/// Grade level that maps to a complexity of `1.0`.
pub const GRADE_CEILING: f64 = 12.0;

/// Score the vocabulary complexity of `text` in `[0, 1]`.
pub fn vocabulary_complexity(text: &str) -> f64 {
    match flesch_kincaid_grade(text) {
        Some(grade) => (grade / GRADE_CEILING).clamp(0.0, 1.0),
        None => 0.0,
    }
}

/// Flesch-Kincaid grade level, or `None` for degenerate input.
///
/// `0.39 * (words / sentences) + 11.8 * (syllables / words) - 15.59`
pub fn flesch_kincaid_grade(text: &str) -> Option<f64> {
    let words: Vec<&str> = text
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|w| w.chars().any(char::is_alphabetic))
        .collect();
    if words.len() < 2 {
        return None;
    }

    let sentences = count_sentences(text).max(1);
    let syllables: usize = words.iter().map(|w| count_syllables(w)).sum();

    let words_per_sentence = words.len() as f64 / sentences as f64;
    let syllables_per_word = syllables as f64 / words.len() as f64;
    let grade = 0.39 * words_per_sentence + 11.8 * syllables_per_word - 15.59;
    grade.is_finite().then_some(grade)
}

/// Count sentence terminators, collapsing runs like `?!` or `...`.
fn count_sentences(text: &str) -> usize {
    let mut count = 0;
    let mut in_run = false;
    for c in text.chars() {
        if matches!(c, '.' | '!' | '?' | ';') {
            if !in_run {
                count += 1;
            }
            in_run = true;
        } else if !c.is_whitespace() {
            in_run = false;
        }
    }
    // trailing text without a terminator still forms a sentence
    let trimmed = text.trim_end();
    if !trimmed.is_empty() && !trimmed.ends_with(['.', '!', '?', ';']) {
        count += 1;
    }
    count
}

/// Estimate syllables by counting vowel groups, dropping a silent final
/// `e`. Every word has at least one syllable.
pub fn count_syllables(word: &str) -> usize {
    let lower: Vec<char> = word
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphabetic())
        .collect();
    if lower.is_empty() {
        return 0;
    }
    if lower.len() <= 3 {
        return 1;
    }

    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
    let mut groups = 0;
    let mut prev_vowel = false;
    for &c in &lower {
        let v = is_vowel(c);
        if v && !prev_vowel {
            groups += 1;
        }
        prev_vowel = v;
    }

    let n = lower.len();
    if lower[n - 1] == 'e' && !(lower[n - 2] == 'l' && !is_vowel(lower[n - 3])) && groups > 1 {
        groups -= 1;
    }
    groups.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_inputs_score_zero() {
        assert_eq!(vocabulary_complexity(""), 0.0);
        assert_eq!(vocabulary_complexity("   "), 0.0);
        assert_eq!(vocabulary_complexity("Supercalifragilistic"), 0.0);
        assert_eq!(vocabulary_complexity("42 17"), 0.0);
    }

    #[test]
    fn simple_text_scores_low() {
        let score = vocabulary_complexity("The cat sat on the mat. The dog ran.");
        assert!(score < 0.2, "score was {score}");
    }

    #[test]
    fn dense_text_scores_high() {
        let score = vocabulary_complexity(
            "Epistemological considerations regarding institutional accountability \
             necessitate comprehensive interdisciplinary investigation",
        );
        assert!(score > 0.9, "score was {score}");
    }

    #[test]
    fn score_is_clamped() {
        for text in ["a b", "Hi there.", "Antidisestablishmentarianism notwithstanding"] {
            let s = vocabulary_complexity(text);
            assert!((0.0..=1.0).contains(&s), "{text}: {s}");
        }
    }

    #[test]
    fn syllable_counts() {
        assert_eq!(count_syllables("cat"), 1);
        assert_eq!(count_syllables("make"), 1);
        assert_eq!(count_syllables("table"), 2);
        assert_eq!(count_syllables("energy"), 3);
        assert_eq!(count_syllables("water"), 2);
        assert_eq!(count_syllables("123"), 0);
    }

    #[test]
    fn sentences_collapse_runs() {
        assert_eq!(count_sentences("Really?! Yes..."), 2);
        assert_eq!(count_sentences("no terminator"), 1);
    }
}
