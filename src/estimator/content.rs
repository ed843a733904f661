//! Content-type lookup: maps phrases like "cover letter" or "haiku" to a
//! typical response length.
//!
//! Two passes run in order. The alias pass maps informal names ("bio",
//! "lit review") to a canonical type. The table pass walks
//! [`CONTENT_TYPES`] in order and, for each entry, tries three contexts:
//! a generation verb shortly before the phrase, the phrase followed by
//! "about/on/for", and finally the bare phrase. Phrases match as whole
//! words (with an optional plural), so "thesis" never fires inside
//! "photosynthesis". The first entry with any match wins, so table order
//! decides between several mentioned types.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use super::patterns::phrase_regex;
use super::tables::CONTENT_TYPES;

/// Informal names and the canonical content type they stand for.
pub const ALIASES: &[(&str, &str)] = &[
    ("blogpost", "blog post"),
    ("write-up", "article"),
    ("writeup", "article"),
    ("bio", "short bio"),
    ("cv", "resume"),
    ("lit review", "literature review"),
    ("readme file", "readme"),
    ("api docs", "api documentation"),
    ("docs", "technical documentation"),
    ("design doc", "design document"),
    ("spec doc", "technical spec"),
    ("prd", "technical spec"),
    ("rfc", "design document"),
    ("tweetstorm", "twitter thread"),
    ("ig caption", "instagram caption"),
    ("insta caption", "instagram caption"),
    ("yt script", "youtube script"),
    ("vid script", "video script"),
    ("op ed", "op-ed"),
    ("press statement", "press release"),
    ("one-pager", "executive summary"),
    ("rec letter", "recommendation letter"),
    ("letter of recommendation", "recommendation letter"),
    ("statement of purpose", "personal statement"),
    ("sop", "personal statement"),
    ("slides", "presentation"),
    ("slide deck", "presentation"),
    ("slideshow", "presentation"),
    ("powerpoint", "presentation"),
    ("deck", "pitch deck"),
    ("sms", "text message"),
    ("dm", "text message"),
    ("tos", "terms of service"),
    ("t&cs", "terms of service"),
    ("unit test", "unit tests"),
    ("poetry", "poem"),
    ("verse", "poem"),
    ("rhyme", "poem"),
    ("song", "song lyrics"),
    ("rap song", "song lyrics"),
    ("bday message", "birthday message"),
    ("thank u note", "thank-you note"),
    ("newsletter issue", "newsletter"),
    ("convo", "dialogue"),
    ("skit", "script"),
    ("screenplay", "script"),
    ("lesson", "lesson plan"),
    ("cheatsheet", "cheat sheet"),
    ("todo list", "to-do list"),
    ("mail", "email"),
];

/// Which context the matched phrase appeared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchContext {
    Alias,
    GenerationVerb,
    Topic,
    Bare,
}

impl fmt::Display for MatchContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Alias => "alias",
            Self::GenerationVerb => "generation verb",
            Self::Topic => "about/on/for",
            Self::Bare => "bare",
        })
    }
}

/// A resolved content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentMatch {
    pub content_type: &'static str,
    pub tokens: usize,
    pub context: MatchContext,
}

struct Entry {
    phrase: &'static str,
    tokens: usize,
    after_verb: Regex,
    before_topic: Regex,
    bare: Regex,
}

static ALIAS_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    ALIASES
        .iter()
        .map(|(alias, canonical)| (phrase_regex(&[*alias]), *canonical))
        .collect()
});

static ENTRIES: LazyLock<Vec<Entry>> = LazyLock::new(|| {
    CONTENT_TYPES
        .iter()
        .map(|&(phrase, tokens)| {
            let p = format!(r"\b{}(?:s|es)?\b", regex::escape(phrase));
            Entry {
                phrase,
                tokens,
                after_verb: Regex::new(&format!(
                    r"\b(?:write|create|generate|draft|compose|produce|make|prepare|craft|develop|design|give me|put together)\b[^.?!]{{0,40}}?{p}"
                ))
                .expect("content verb pattern is valid"),
                before_topic: Regex::new(&format!(
                    r"{p}\s+(?:about|on|for|regarding|of)\b"
                ))
                .expect("content topic pattern is valid"),
                bare: Regex::new(&p).expect("content phrase pattern is valid"),
            }
        })
        .collect()
});

/// Look up the typical token count for a canonical content type.
pub fn tokens_for(content_type: &str) -> Option<usize> {
    CONTENT_TYPES
        .iter()
        .find(|(phrase, _)| *phrase == content_type)
        .map(|(_, tokens)| *tokens)
}

/// Resolve the content type requested by a lowercased prompt.
pub fn match_content_type(lower: &str) -> Option<ContentMatch> {
    match_alias(lower).or_else(|| match_table(lower))
}

fn match_alias(lower: &str) -> Option<ContentMatch> {
    ALIAS_PATTERNS
        .iter()
        .find(|(re, _)| re.is_match(lower))
        .and_then(|(_, canonical)| {
            let &(content_type, tokens) = CONTENT_TYPES.iter().find(|(p, _)| p == canonical)?;
            Some(ContentMatch {
                content_type,
                tokens,
                context: MatchContext::Alias,
            })
        })
}

fn match_table(lower: &str) -> Option<ContentMatch> {
    ENTRIES.iter().find_map(|entry| {
        let context = if entry.after_verb.is_match(lower) {
            MatchContext::GenerationVerb
        } else if entry.before_topic.is_match(lower) {
            MatchContext::Topic
        } else if entry.bare.is_match(lower) {
            MatchContext::Bare
        } else {
            return None;
        };
        Some(ContentMatch {
            content_type: entry.phrase,
            tokens: entry.tokens,
            context,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_alias_points_at_a_table_entry() {
        for (alias, canonical) in ALIASES {
            assert!(tokens_for(canonical).is_some(), "{alias} -> {canonical}");
        }
    }

    #[test]
    fn table_has_no_duplicates_or_tiny_phrases() {
        let mut seen = std::collections::HashSet::new();
        for (phrase, tokens) in CONTENT_TYPES {
            assert!(seen.insert(*phrase), "duplicate {phrase}");
            assert!(phrase.len() >= 3, "{phrase} is too short to be specific");
            assert!(*tokens > 0);
        }
        assert!(CONTENT_TYPES.len() >= 200);
    }

    #[test]
    fn generation_verb_context() {
        let m = match_content_type("write a haiku about autumn").unwrap();
        assert_eq!(m.content_type, "haiku");
        assert_eq!(m.tokens, 30);
        assert_eq!(m.context, MatchContext::GenerationVerb);
    }

    #[test]
    fn topic_context() {
        let m = match_content_type("i need a cover letter for a nursing job").unwrap();
        assert_eq!(m.content_type, "cover letter");
        assert_eq!(m.context, MatchContext::Topic);
    }

    #[test]
    fn bare_context() {
        let m = match_content_type("haiku please").unwrap();
        assert_eq!(m.context, MatchContext::Bare);
    }

    #[test]
    fn specific_types_win_over_generic() {
        assert_eq!(
            match_content_type("draft a business plan for my bakery").unwrap().content_type,
            "business plan"
        );
        assert_eq!(
            match_content_type("write a persuasive essay").unwrap().content_type,
            "persuasive essay"
        );
    }

    #[test]
    fn table_order_decides_between_types() {
        // "essay" is listed before "report"
        let m = match_content_type("turn this report into an essay").unwrap();
        assert_eq!(m.content_type, "essay");
    }

    #[test]
    fn aliases_run_first() {
        let m = match_content_type("update my cv for a design role").unwrap();
        assert_eq!(m.content_type, "resume");
        assert_eq!(m.context, MatchContext::Alias);
        assert_eq!(match_content_type("write my bio").unwrap().content_type, "short bio");
    }

    #[test]
    fn aliases_need_whole_words() {
        // "bio" inside "biology" is not an alias hit
        let m = match_content_type("write a biology study guide");
        assert_eq!(m.unwrap().content_type, "study guide");
    }

    #[test]
    fn phrases_need_whole_words() {
        assert_eq!(match_content_type("explain photosynthesis"), None);
        assert_eq!(match_content_type("write three haikus").unwrap().content_type, "haiku");
    }

    #[test]
    fn no_content_type() {
        assert_eq!(match_content_type("hello there"), None);
    }
}
