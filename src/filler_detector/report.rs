use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::aggregate::{CategoryCounts, DistributionAnalysis};
use super::catalog::FillerCategory;
use super::patterns::FillerPatternAnalysis;

/// A flagged filler occurrence, by char offset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillerPosition {
    /// Matched text as it appears in the transcript
    pub word: String,
    pub position: usize,
}

impl FillerPosition {
    /// Exclusive end char offset
    pub fn end(&self) -> usize {
        self.position + self.word.chars().count()
    }
}

/// Full result of a filler analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillerAnalysisResult {
    pub total_filler_words: usize,
    pub fillers_per_minute: f64,
    pub category_counts: CategoryCounts,
    /// Keyed by lowercased filler text
    pub specific_filler_counts: BTreeMap<String, usize>,
    /// Flagged fillers in transcript order
    pub filler_positions: Vec<FillerPosition>,
    pub distribution_analysis: DistributionAnalysis,
    /// Flagged / raw matches as a rounded percentage; 100 with no raw matches
    pub detection_accuracy: u32,
    pub detection_summary: String,
    pub patterns: FillerPatternAnalysis,
}

/// Usage count of one specific filler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillerWordCount {
    pub word: String,
    pub count: usize,
}

/// One category card: label, count and percentage of all flagged fillers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: FillerCategory,
    pub label: String,
    pub count: usize,
    pub percentage: f64,
}

impl FillerAnalysisResult {
    pub fn category_breakdown(&self) -> Vec<CategoryShare> {
        self.category_counts
            .iter()
            .map(|(category, count)| CategoryShare {
                category,
                label: category.label().to_string(),
                count,
                percentage: self.category_counts.share(category),
            })
            .collect()
    }

    /// The `limit` most used fillers, by count descending then text.
    pub fn top_fillers(&self, limit: usize) -> Vec<FillerWordCount> {
        let mut breakdown: Vec<FillerWordCount> = self
            .specific_filler_counts
            .iter()
            .map(|(word, &count)| FillerWordCount {
                word: word.clone(),
                count,
            })
            .collect();

        // BTreeMap iteration is already sorted by word; the sort is stable.
        breakdown.sort_by(|a, b| b.count.cmp(&a.count));
        breakdown.truncate(limit);
        breakdown
    }
}

pub fn detection_accuracy(raw_count: usize, flagged_count: usize) -> u32 {
    if raw_count == 0 {
        return 100;
    }
    (flagged_count as f64 / raw_count as f64 * 100.0).round() as u32
}

pub fn detection_summary(raw_count: usize, flagged_count: usize, accuracy: u32) -> String {
    format!(
        "Analyzed {} potential fillers, flagged {} as actual fillers ({}% detection confidence)",
        raw_count, flagged_count, accuracy
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Normal,
    Filler,
}

/// A run of transcript text, either plain or a flagged filler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub kind: SegmentKind,
    pub text: String,
}

/// Split the transcript into alternating plain and filler segments for
/// highlighting. Concatenating the segment texts yields the transcript.
pub fn highlight_segments(transcript: &str, fillers: &[FillerPosition]) -> Vec<TranscriptSegment> {
    let chars: Vec<char> = transcript.chars().collect();
    let mut ranges: Vec<(usize, usize)> = fillers
        .iter()
        .map(|f| (f.position, f.end().min(chars.len())))
        .filter(|(start, end)| start < end)
        .collect();
    ranges.sort();

    let text_of = |start: usize, end: usize| chars[start..end].iter().collect::<String>();
    let mut segments = Vec::new();
    let mut pos = 0;

    for (start, end) in ranges {
        // Ranges never overlap for detector output, but stay safe on input
        // built by hand.
        let start = start.max(pos);
        if start >= end {
            continue;
        }
        if pos < start {
            segments.push(TranscriptSegment {
                kind: SegmentKind::Normal,
                text: text_of(pos, start),
            });
        }
        segments.push(TranscriptSegment {
            kind: SegmentKind::Filler,
            text: text_of(start, end),
        });
        pos = end;
    }

    if pos < chars.len() {
        segments.push(TranscriptSegment {
            kind: SegmentKind::Normal,
            text: text_of(pos, chars.len()),
        });
    }

    segments
}
