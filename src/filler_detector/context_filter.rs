//! Contextual disambiguation of filler matches.
//!
//! Most catalog words also have legitimate uses ("I'd like that", "so that",
//! "as well"). Each word with such a use gets a rule that looks at a window
//! of nearby tokens and the raw text around the match. A rule returns the
//! reason a match is *not* a filler, or `None` to keep it flagged.

use log::trace;
use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::matcher::RawMatch;
use super::transcript::{find_token_index, Transcript, WordToken};

/// Tokens inspected on each side of the match
pub const CONTEXT_TOKENS: usize = 3;
/// Chars before the match included in the phrase window
const PHRASE_WINDOW_BEFORE: usize = 20;
/// Chars from the match start included in the phrase window
const PHRASE_WINDOW_AFTER: usize = 40;

const BE_LIKE: &[&str] = &[
    "was", "is", "were", "are", "am", "be", "been", "being", "looks", "look", "looked", "sounds",
    "sound", "sounded", "feels", "feel", "felt",
];

const DETERMINERS: &[&str] = &[
    "this", "that", "these", "those", "my", "your", "his", "her", "its", "our", "their", "a",
    "an", "the", "some", "any", "each", "every", "no", "another", "either", "neither", "both",
    "few", "many", "much", "several",
];

const PRONOUNS: &[&str] = &[
    "him", "her", "them", "me", "us", "you", "i", "he", "she", "we", "they", "it", "someone",
    "somebody", "something", "anyone", "anybody", "anything",
];

const WOULD_LIKE: &[&str] = &["would like", "i'd like", "id like", "i would like"];

const INTENSIFIED: &[&str] = &[
    "good", "bad", "happy", "sad", "great", "small", "big", "tired", "excited", "important",
    "funny", "hard", "easy", "simple", "beautiful",
];

const AS_WELL: &[&str] = &["as well", "might as well"];

const CORRECTION_CUES: &[&str] = &["not", "no", "just", "rather", "specifically", "in", "because"];

const CLARIFICATION_CUES: &[&str] = &[
    "that", "because", "if", "when", "what", "where", "why", "how", "to", "for", "by",
];

/// Lowercased tokens around a match, anchored on the token containing the
/// match start.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextWindow {
    pub before: Vec<String>,
    pub after: Vec<String>,
}

impl ContextWindow {
    pub fn around(tokens: &[WordToken], index: usize) -> Self {
        let before = tokens[index.saturating_sub(CONTEXT_TOKENS)..index]
            .iter()
            .map(WordToken::lowercase)
            .collect();
        let after = tokens
            .iter()
            .skip(index + 1)
            .take(CONTEXT_TOKENS)
            .map(WordToken::lowercase)
            .collect();
        Self { before, after }
    }

    pub fn preceded_by(&self, words: &[&str]) -> bool {
        self.before.iter().any(|w| words.contains(&w.as_str()))
    }

    pub fn followed_by(&self, words: &[&str]) -> bool {
        self.after.iter().any(|w| words.contains(&w.as_str()))
    }
}

/// Everything a rule may look at
pub struct MatchContext<'a, 't> {
    pub transcript: &'a Transcript<'t>,
    pub candidate: &'a RawMatch,
    pub window: ContextWindow,
}

impl MatchContext<'_, '_> {
    /// Lowercased text from 20 chars before the match to 40 chars after its
    /// start contains one of `phrases`.
    fn in_phrase(&self, phrases: &[&str]) -> bool {
        let start = self.candidate.start;
        let slice = self
            .transcript
            .slice(
                start.saturating_sub(PHRASE_WINDOW_BEFORE),
                start + PHRASE_WINDOW_AFTER,
            )
            .to_lowercase();
        phrases.iter().any(|p| slice.contains(p))
    }

    /// No letter between the match and the previous sentence terminator
    /// (or the start of the transcript).
    fn at_sentence_start(&self) -> bool {
        for pos in (0..self.candidate.start).rev() {
            match self.transcript.char_at(pos) {
                Some(c) if c.is_ascii_alphabetic() => return false,
                Some('.' | '!' | '?') => return true,
                _ => {}
            }
        }
        true
    }

    fn comma_follows(&self) -> bool {
        self.transcript.after(self.candidate.end(), 2).contains(',')
    }
}

/// Returns why the match is not a filler, or `None` to flag it.
type Rule = fn(&MatchContext<'_, '_>) -> Option<&'static str>;

fn rule_you_know(_: &MatchContext<'_, '_>) -> Option<&'static str> {
    None
}

fn rule_like(ctx: &MatchContext<'_, '_>) -> Option<&'static str> {
    if ctx.window.preceded_by(BE_LIKE) {
        return Some("comparison after a linking verb");
    }
    if ctx.window.followed_by(DETERMINERS) || ctx.window.followed_by(PRONOUNS) {
        return Some("verb taking a determiner or pronoun");
    }
    if ctx.in_phrase(WOULD_LIKE) {
        return Some("part of 'would like'");
    }
    None
}

fn rule_so(ctx: &MatchContext<'_, '_>) -> Option<&'static str> {
    if ctx.window.followed_by(&["that"]) {
        return Some("'so that' purpose clause");
    }
    if ctx.at_sentence_start() && ctx.comma_follows() {
        return Some("sentence opener followed by a comma");
    }
    if ctx.window.followed_by(INTENSIFIED) {
        return Some("intensifier before an adjective");
    }
    None
}

fn rule_well(ctx: &MatchContext<'_, '_>) -> Option<&'static str> {
    ctx.in_phrase(AS_WELL).then_some("part of 'as well'")
}

fn rule_correction(ctx: &MatchContext<'_, '_>) -> Option<&'static str> {
    ctx.window
        .followed_by(CORRECTION_CUES)
        .then_some("introduces a correction")
}

fn rule_i_mean(ctx: &MatchContext<'_, '_>) -> Option<&'static str> {
    ctx.window
        .followed_by(CLARIFICATION_CUES)
        .then_some("introduces a clarification")
}

/// Per-filler rules. Fillers without an entry are always flagged.
static RULES: Lazy<HashMap<&'static str, Rule>> = Lazy::new(|| {
    let mut rules: HashMap<&'static str, Rule> = HashMap::new();
    rules.insert("you know", rule_you_know);
    rules.insert("like", rule_like);
    rules.insert("so", rule_so);
    rules.insert("well", rule_well);
    rules.insert("actually", rule_correction);
    rules.insert("basically", rule_correction);
    rules.insert("i mean", rule_i_mean);
    rules
});

/// Lowercase, strip everything but word chars, whitespace and apostrophes,
/// and collapse whitespace runs.
pub fn normalize_match(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '\'' || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Decide whether a match is a genuine filler.
pub fn should_flag_filler(
    transcript: &Transcript<'_>,
    candidate: &RawMatch,
    tokens: &[WordToken],
) -> bool {
    let normalized = normalize_match(&candidate.matched_text);
    let Some(rule) = RULES.get(normalized.as_str()) else {
        return true;
    };

    let window = find_token_index(tokens, candidate.start)
        .map(|index| ContextWindow::around(tokens, index))
        .unwrap_or_default();
    let ctx = MatchContext {
        transcript,
        candidate,
        window,
    };

    match rule(&ctx) {
        Some(reason) => {
            trace!(
                "Not a filler: '{}' at {} ({})",
                candidate.matched_text,
                candidate.start,
                reason
            );
            false
        }
        None => true,
    }
}

/// Keep only the matches that are genuine fillers.
pub fn filter_fillers(
    transcript: &Transcript<'_>,
    matches: &[RawMatch],
    tokens: &[WordToken],
) -> Vec<RawMatch> {
    matches
        .iter()
        .filter(|m| should_flag_filler(transcript, m, tokens))
        .cloned()
        .collect()
}
