//! Character-offset view over a transcript plus the word tokenizer.
//!
//! Every position reported by the detector is a char offset (Unicode scalar
//! values), not a byte offset. `Transcript` owns the mapping between the two
//! so the matcher can run regexes on the UTF-8 string and still report
//! positions in the caller's coordinate system.

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximal runs of ASCII letters and apostrophes.
static WORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z']+").expect("word pattern is valid"));

/// A single word token with char offsets into the transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordToken {
    pub text: String,
    /// Inclusive start char offset
    pub start: usize,
    /// Exclusive end char offset
    pub end: usize,
}

impl WordToken {
    pub fn lowercase(&self) -> String {
        self.text.to_ascii_lowercase()
    }
}

/// Immutable transcript with byte <-> char offset conversion.
#[derive(Debug, Clone)]
pub struct Transcript<'t> {
    text: &'t str,
    /// Byte index of every char, in order
    char_starts: Vec<usize>,
}

impl<'t> Transcript<'t> {
    pub fn new(text: &'t str) -> Self {
        Self {
            text,
            char_starts: text.char_indices().map(|(i, _)| i).collect(),
        }
    }

    pub fn as_str(&self) -> &'t str {
        self.text
    }

    /// Length in chars
    pub fn len(&self) -> usize {
        self.char_starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.char_starts.is_empty()
    }

    /// Convert a byte offset on a char boundary to a char offset.
    pub fn char_offset(&self, byte: usize) -> usize {
        self.char_starts.partition_point(|&b| b < byte)
    }

    /// Convert a char offset to a byte offset, clamping past the end.
    pub fn byte_offset(&self, char_pos: usize) -> usize {
        self.char_starts
            .get(char_pos)
            .copied()
            .unwrap_or(self.text.len())
    }

    /// Substring by char range, with both ends clamped to the transcript.
    pub fn slice(&self, start: usize, end: usize) -> &'t str {
        let end = end.min(self.len());
        let start = start.min(end);
        &self.text[self.byte_offset(start)..self.byte_offset(end)]
    }

    /// Up to `n` chars ending right before `pos`.
    pub fn before(&self, pos: usize, n: usize) -> &'t str {
        self.slice(pos.saturating_sub(n), pos)
    }

    /// Up to `n` chars starting at `pos`.
    pub fn after(&self, pos: usize, n: usize) -> &'t str {
        self.slice(pos, pos.saturating_add(n))
    }

    /// Char at a char offset.
    pub fn char_at(&self, pos: usize) -> Option<char> {
        self.char_starts
            .get(pos)
            .and_then(|&b| self.text[b..].chars().next())
    }

    /// Lazily yield word tokens. Calling again restarts the scan.
    pub fn words(&self) -> WordTokens<'_, 't> {
        WordTokens {
            transcript: self,
            matches: WORD_PATTERN.find_iter(self.text),
        }
    }

    /// Collect all word tokens.
    pub fn tokenize(&self) -> Vec<WordToken> {
        self.words().collect()
    }
}

/// Iterator over the word tokens of a transcript
pub struct WordTokens<'a, 't> {
    transcript: &'a Transcript<'t>,
    matches: regex::Matches<'static, 't>,
}

impl Iterator for WordTokens<'_, '_> {
    type Item = WordToken;

    fn next(&mut self) -> Option<Self::Item> {
        let m = self.matches.next()?;
        let start = self.transcript.char_offset(m.start());
        // The pattern is ASCII-only, so char length equals byte length.
        Some(WordToken {
            text: m.as_str().to_string(),
            start,
            end: start + m.as_str().len(),
        })
    }
}

/// Index of the token whose `[start, end)` covers `pos`.
pub fn find_token_index(tokens: &[WordToken], pos: usize) -> Option<usize> {
    tokens.iter().position(|t| t.start <= pos && pos < t.end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_offsets() {
        let transcript = Transcript::new("Um, I don't know.");
        let tokens = transcript.tokenize();

        let words: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(words, vec!["Um", "I", "don't", "know"]);
        assert_eq!((tokens[0].start, tokens[0].end), (0, 2));
        assert_eq!((tokens[2].start, tokens[2].end), (6, 11));
    }

    #[test]
    fn test_digits_and_punctuation_separate_tokens() {
        let transcript = Transcript::new("abc123def--ghi");
        let words: Vec<String> = transcript.words().map(|t| t.text).collect();
        assert_eq!(words, vec!["abc", "def", "ghi"]);
    }

    #[test]
    fn test_words_is_restartable() {
        let transcript = Transcript::new("so well now");
        assert_eq!(transcript.words().count(), 3);
        assert_eq!(transcript.words().count(), 3);
    }

    #[test]
    fn test_char_offsets_with_multibyte_text() {
        // "é" is two bytes but one char
        let transcript = Transcript::new("café um");
        assert_eq!(transcript.len(), 7);

        let tokens = transcript.tokenize();
        let um = tokens.iter().find(|t| t.text == "um").unwrap();
        assert_eq!(um.start, 5);
        assert_eq!(transcript.slice(um.start, um.end), "um");
        assert_eq!(transcript.char_at(3), Some('é'));
    }

    #[test]
    fn test_windows_clamp_to_bounds() {
        let transcript = Transcript::new("hello");
        assert_eq!(transcript.before(2, 20), "he");
        assert_eq!(transcript.after(3, 40), "lo");
        assert_eq!(transcript.after(10, 40), "");
        assert_eq!(transcript.slice(4, 2), "");
    }

    #[test]
    fn test_find_token_index() {
        let transcript = Transcript::new("I mean it");
        let tokens = transcript.tokenize();
        assert_eq!(find_token_index(&tokens, 0), Some(0));
        assert_eq!(find_token_index(&tokens, 3), Some(1));
        assert_eq!(find_token_index(&tokens, 1), None);
    }

    #[test]
    fn test_empty_transcript() {
        let transcript = Transcript::new("");
        assert!(transcript.is_empty());
        assert!(transcript.tokenize().is_empty());
        assert_eq!(transcript.slice(0, 10), "");
    }
}
