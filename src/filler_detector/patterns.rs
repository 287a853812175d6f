//! Where and in what rhetorical situation fillers show up, plus the
//! coaching insights derived from that.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::context_filter::ContextWindow;
use super::report::FillerPosition;
use super::transcript::{find_token_index, Transcript, WordToken};
use crate::settings::AnalyzerSettings;

/// Radius in chars for listing and sentence-boundary checks
const CONTEXT_RADIUS: usize = 40;

const EXPLANATION_CUES: &[&str] = &["because", "since", "essentially", "basically"];
const EXPLANATION_PHRASES: &[&str] = &["the reason", "in other words"];
const LISTING_CUES: &[&str] = &["first", "second", "third", "also", "and", "or"];
const TRANSITION_CUES: &[&str] = &["so", "now", "then", "moving", "on", "anyway", "but", "however"];
const TRANSITION_PHRASES: &[&str] = &["moving on", "anyway"];

static AND_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\band\b").expect("'and' pattern is valid"));

pub const OPENING_INSIGHT: &str =
    "Most fillers appeared when starting to speak. Try taking a breath before beginning.";
pub const EXPLAINING_INSIGHT: &str =
    "You used more fillers when explaining concepts. Practice explaining complex ideas beforehand.";
pub const LISTING_INSIGHT: &str =
    "Fillers increased when listing multiple items. Try organizing lists mentally first.";
pub const TRANSITIONING_INSIGHT: &str =
    "Fillers appeared when changing topics. Plan your transitions ahead of time.";
pub const PACING_INSIGHT: &str =
    "Many fillers mid-sentence suggest thinking while speaking. Slow down slightly.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionPatterns {
    pub start_of_speech: usize,
    pub mid_speech: usize,
    pub end_of_speech: usize,
}

/// Context buckets. A filler may count toward several.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextPatterns {
    pub when_explaining: usize,
    pub when_listing: usize,
    pub when_transitioning: usize,
    pub when_answering: usize,
    pub mid_sentence: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechContext {
    Explaining,
    Listing,
    Transitioning,
    Answering,
    MidSentence,
}

impl ContextPatterns {
    /// Buckets in declaration order
    pub fn entries(&self) -> [(SpeechContext, usize); 5] {
        [
            (SpeechContext::Explaining, self.when_explaining),
            (SpeechContext::Listing, self.when_listing),
            (SpeechContext::Transitioning, self.when_transitioning),
            (SpeechContext::Answering, self.when_answering),
            (SpeechContext::MidSentence, self.mid_sentence),
        ]
    }

    /// Highest bucket; ties go to the earlier declared one.
    pub fn dominant(&self) -> SpeechContext {
        let entries = self.entries();
        let mut top = entries[0];
        for entry in &entries[1..] {
            if entry.1 > top.1 {
                top = *entry;
            }
        }
        top.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillerPatternAnalysis {
    pub position_patterns: PositionPatterns,
    pub context_patterns: ContextPatterns,
    pub insights: Vec<String>,
}

struct PatternScanner<'a, 't> {
    transcript: &'a Transcript<'t>,
    tokens: Vec<WordToken>,
    question_marks: Vec<usize>,
    settings: &'a AnalyzerSettings,
}

impl<'a, 't> PatternScanner<'a, 't> {
    fn new(transcript: &'a Transcript<'t>, settings: &'a AnalyzerSettings) -> Self {
        let question_marks = transcript
            .as_str()
            .chars()
            .enumerate()
            .filter(|(_, c)| *c == '?')
            .map(|(i, _)| i)
            .collect();
        Self {
            transcript,
            tokens: transcript.tokenize(),
            question_marks,
            settings,
        }
    }

    /// Lowercased tokens: up to three before, the token itself, up to three after.
    fn window_words(&self, index: usize) -> Vec<String> {
        let ContextWindow { before, after } = ContextWindow::around(&self.tokens, index);
        let mut words = before;
        words.push(self.tokens[index].lowercase());
        words.extend(after);
        words
    }

    fn is_explaining(words: &[String]) -> bool {
        let joined = words.join(" ");
        words.iter().any(|w| EXPLANATION_CUES.contains(&w.as_str()))
            || EXPLANATION_PHRASES.iter().any(|p| joined.contains(p))
    }

    fn is_listing(&self, words: &[String], index: usize) -> bool {
        if words.iter().any(|w| LISTING_CUES.contains(&w.as_str())) {
            return true;
        }
        let token = &self.tokens[index];
        let nearby = self.transcript.slice(
            token.start.saturating_sub(CONTEXT_RADIUS),
            token.end + CONTEXT_RADIUS,
        );
        let commas = nearby.matches(',').count();
        let ands = AND_PATTERN.find_iter(nearby).count();
        commas >= 2 || ands >= 2
    }

    fn is_transitioning(words: &[String]) -> bool {
        let joined = words.join(" ");
        words.iter().any(|w| TRANSITION_CUES.contains(&w.as_str()))
            || TRANSITION_PHRASES.iter().any(|p| joined.contains(p))
    }

    fn is_answering(&self, pos: usize) -> bool {
        let cutoff = self.transcript.len() as f64 * self.settings.answering_ratio;
        if pos as f64 <= cutoff {
            return true;
        }
        self.question_marks
            .iter()
            .any(|&q| pos >= q && pos - q < CONTEXT_RADIUS)
    }

    fn is_mid_sentence(&self, pos: usize, length: usize) -> bool {
        let is_boundary = |c: char| matches!(c, '.' | '!' | '?');
        let before = self.transcript.before(pos, CONTEXT_RADIUS);
        let after = self.transcript.after(pos + length, CONTEXT_RADIUS);
        !(before.contains(is_boundary) || after.contains(is_boundary))
    }

    fn scan(&self, fillers: &[FillerPosition]) -> (PositionPatterns, ContextPatterns) {
        let len = self.transcript.len() as f64;
        let start_cutoff = len * self.settings.start_of_speech_ratio;
        let end_cutoff = len * self.settings.end_of_speech_ratio;

        let mut positions = PositionPatterns::default();
        let mut contexts = ContextPatterns::default();

        for filler in fillers {
            let pos = filler.position as f64;
            if pos < start_cutoff {
                positions.start_of_speech += 1;
            } else if pos >= end_cutoff {
                positions.end_of_speech += 1;
            } else {
                positions.mid_speech += 1;
            }

            if let Some(index) = find_token_index(&self.tokens, filler.position) {
                let words = self.window_words(index);
                if Self::is_explaining(&words) {
                    contexts.when_explaining += 1;
                }
                if self.is_listing(&words, index) {
                    contexts.when_listing += 1;
                }
                if Self::is_transitioning(&words) {
                    contexts.when_transitioning += 1;
                }
            }

            if self.is_answering(filler.position) {
                contexts.when_answering += 1;
            }
            if self.is_mid_sentence(filler.position, filler.word.chars().count()) {
                contexts.mid_sentence += 1;
            }
        }

        (positions, contexts)
    }
}

fn build_insights(
    positions: &PositionPatterns,
    contexts: &ContextPatterns,
    filler_count: usize,
    settings: &AnalyzerSettings,
) -> Vec<String> {
    let total = filler_count.max(1) as f64;
    let mut insights = Vec::new();

    if positions.start_of_speech as f64 / total > settings.opening_insight_share {
        insights.push(OPENING_INSIGHT.to_string());
    }

    match contexts.dominant() {
        SpeechContext::Explaining => insights.push(EXPLAINING_INSIGHT.to_string()),
        SpeechContext::Listing => insights.push(LISTING_INSIGHT.to_string()),
        SpeechContext::Transitioning => insights.push(TRANSITIONING_INSIGHT.to_string()),
        SpeechContext::Answering | SpeechContext::MidSentence => {}
    }

    if contexts.mid_sentence as f64 / total > settings.mid_sentence_insight_share {
        insights.push(PACING_INSIGHT.to_string());
    }

    insights
}

/// Classify flagged fillers by position and context and derive insights.
pub fn analyze_filler_patterns(
    transcript: &Transcript<'_>,
    fillers: &[FillerPosition],
    settings: &AnalyzerSettings,
) -> FillerPatternAnalysis {
    let scanner = PatternScanner::new(transcript, settings);
    let (position_patterns, context_patterns) = scanner.scan(fillers);
    let insights = build_insights(&position_patterns, &context_patterns, fillers.len(), settings);

    FillerPatternAnalysis {
        position_patterns,
        context_patterns,
        insights,
    }
}
