//! Multi-pattern scan of a transcript against the filler catalog.

use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;

use super::catalog::{entries_by_length, CatalogEntry, FillerCategory};
use super::transcript::Transcript;

/// A candidate filler occurrence before contextual filtering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch {
    /// Text as it appears in the transcript (original case and spacing)
    pub matched_text: String,
    pub category: FillerCategory,
    /// Char offset of the first char
    pub start: usize,
    /// Length in chars
    pub length: usize,
}

impl RawMatch {
    pub fn end(&self) -> usize {
        self.start + self.length
    }
}

/// Whole-word, case-insensitive pattern for a catalog phrase. Interior
/// spaces accept any run of whitespace.
fn pattern_for_filler(phrase: &str) -> String {
    let body = phrase
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    format!(r"(?i)\b{}\b", body)
}

/// Unicode case folding also matches look-alikes such as the long s or the
/// Kelvin sign. Only ASCII case variants of the phrase count.
fn is_ascii_variant(matched: &str, phrase: &str) -> bool {
    let mut matched_words = matched.split_whitespace();
    let mut phrase_words = phrase.split_whitespace();
    loop {
        match (matched_words.next(), phrase_words.next()) {
            (Some(a), Some(b)) if a.eq_ignore_ascii_case(b) => continue,
            (None, None) => return true,
            _ => return false,
        }
    }
}

static CATALOG_PATTERNS: Lazy<Vec<(CatalogEntry, Regex)>> = Lazy::new(|| {
    entries_by_length()
        .iter()
        .map(|entry| {
            let regex = Regex::new(&pattern_for_filler(entry.phrase))
                .expect("catalog phrases compile to valid patterns");
            (*entry, regex)
        })
        .collect()
});

/// Every catalog occurrence in the transcript, overlapping ones included.
/// Longer phrases are scanned first.
pub fn find_raw_matches(transcript: &Transcript<'_>) -> Vec<RawMatch> {
    let text = transcript.as_str();
    let mut matches = Vec::new();

    for (entry, regex) in CATALOG_PATTERNS.iter() {
        for m in regex.find_iter(text) {
            if !is_ascii_variant(m.as_str(), entry.phrase) {
                trace!("Skipping non-ASCII look-alike '{}'", m.as_str());
                continue;
            }
            let start = transcript.char_offset(m.start());
            let end = transcript.char_offset(m.end());
            matches.push(RawMatch {
                matched_text: m.as_str().to_string(),
                category: entry.category,
                start,
                length: end - start,
            });
        }
    }

    matches
}

/// Drop overlapping matches.
///
/// Matches are ordered by start ascending, then length descending, and swept
/// left to right: a match is kept only if it starts at or after the end of
/// the last kept match. This is greedy, not a best cover, so an earlier
/// short match beats a later long one that overlaps it.
pub fn resolve_overlaps(mut matches: Vec<RawMatch>) -> Vec<RawMatch> {
    matches.sort_by(|a, b| a.start.cmp(&b.start).then(b.length.cmp(&a.length)));

    let mut kept: Vec<RawMatch> = Vec::with_capacity(matches.len());
    let mut last_end = 0;

    for m in matches {
        if m.start >= last_end {
            last_end = m.end();
            kept.push(m);
        } else {
            trace!(
                "Dropping overlapping match '{}' at {} (boundary {})",
                m.matched_text,
                m.start,
                last_end
            );
        }
    }

    kept
}

/// Raw scan followed by overlap resolution, sorted by position.
pub fn find_filler_matches(transcript: &Transcript<'_>) -> Vec<RawMatch> {
    resolve_overlaps(find_raw_matches(transcript))
}
