//! Filler word detection and speech pattern analysis.
//!
//! Pipeline: the transcript is tokenized and scanned against the filler
//! catalog, overlapping matches are resolved, each match is checked against
//! its surrounding words to weed out legitimate uses, and the survivors are
//! tallied and classified into a [`FillerAnalysisResult`].
//!
//! Every call is a pure function of its inputs; the only shared data are
//! read-only statics (catalog and compiled patterns).

pub mod aggregate;
pub mod catalog;
pub mod context_filter;
pub mod matcher;
pub mod patterns;
pub mod report;
pub mod transcript;

use log::debug;

use crate::settings::AnalyzerSettings;

pub use aggregate::{CategoryCounts, DistributionAnalysis};
pub use catalog::FillerCategory;
pub use matcher::RawMatch;
pub use patterns::{ContextPatterns, FillerPatternAnalysis, PositionPatterns};
pub use report::{
    highlight_segments, CategoryShare, FillerAnalysisResult, FillerPosition, FillerWordCount,
    SegmentKind, TranscriptSegment,
};
pub use transcript::{Transcript, WordToken};

/// Analyze a transcript with default settings.
///
/// # Arguments
/// * `transcript` - The transcribed speech
/// * `duration_minutes` - Spoken duration; a non-positive value yields a rate of 0
pub fn analyze(transcript: &str, duration_minutes: f64) -> FillerAnalysisResult {
    analyze_with_settings(transcript, duration_minutes, &AnalyzerSettings::default())
}

pub fn analyze_with_settings(
    transcript: &str,
    duration_minutes: f64,
    settings: &AnalyzerSettings,
) -> FillerAnalysisResult {
    let transcript = Transcript::new(transcript);
    let tokens = transcript.tokenize();

    let matches = matcher::find_filler_matches(&transcript);
    let flagged = context_filter::filter_fillers(&transcript, &matches, &tokens);
    let tally = aggregate::tally(&flagged, transcript.len(), duration_minutes);

    let filler_positions: Vec<FillerPosition> = flagged
        .into_iter()
        .map(|m| FillerPosition {
            word: m.matched_text,
            position: m.start,
        })
        .collect();

    let detection_accuracy = report::detection_accuracy(matches.len(), tally.total);
    let detection_summary =
        report::detection_summary(matches.len(), tally.total, detection_accuracy);
    let patterns = patterns::analyze_filler_patterns(&transcript, &filler_positions, settings);

    debug!(
        "Filler analysis: {} chars, {} candidates, {} flagged, {:.2} per minute",
        transcript.len(),
        matches.len(),
        tally.total,
        tally.fillers_per_minute
    );

    FillerAnalysisResult {
        total_filler_words: tally.total,
        fillers_per_minute: tally.fillers_per_minute,
        category_counts: tally.category_counts,
        specific_filler_counts: tally.specific_counts,
        filler_positions,
        distribution_analysis: tally.distribution,
        detection_accuracy,
        detection_summary,
        patterns,
    }
}

/// Duration to pass to [`analyze`] for a recording of `seconds`, floored at
/// the configured minimum so very short clips don't produce absurd rates.
pub fn duration_minutes_from_seconds(seconds: f64, settings: &AnalyzerSettings) -> f64 {
    let minutes = seconds / 60.0;
    if minutes.is_nan() {
        return settings.min_duration_minutes;
    }
    minutes.max(settings.min_duration_minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "",
        "   ",
        "Um, so I think, like, this is kind of great.",
        "So, well, I mean, you know, it was like, basically, um, okay? Then uh let me think.",
        "First, um, we get bread, and, uh, milk and eggs. Anyway, so, moving on. Now what?",
        "Well well well. Hmm. Alright then, let me see how do I say this, sort of literally.",
        "UM UH er Ah HMM actually literally ok alright okay",
        "Café naïve — um, like, you know… so that's it",
    ];

    fn flagged_words(result: &FillerAnalysisResult) -> Vec<String> {
        result
            .filler_positions
            .iter()
            .map(|f| f.word.to_lowercase())
            .collect()
    }

    #[test]
    fn test_scenario_mixed_fillers() {
        let result = analyze("Um, so I think, like, this is kind of great.", 1.0);

        // "like" is followed by the determiner "this", so only three survive
        assert_eq!(flagged_words(&result), vec!["um", "so", "kind of"]);
        assert_eq!(result.total_filler_words, 3);
        assert_eq!(result.fillers_per_minute, 3.0);
        assert_eq!(result.category_counts.hesitation, 1);
        assert_eq!(result.category_counts.temporal, 1);
        assert_eq!(result.category_counts.discourse, 1);
        assert_eq!(result.category_counts.thinking, 0);
        assert_eq!(result.detection_accuracy, 75);
        assert_eq!(
            result.detection_summary,
            "Analyzed 4 potential fillers, flagged 3 as actual fillers (75% detection confidence)"
        );
        assert_eq!(
            result
                .filler_positions
                .iter()
                .map(|f| f.position)
                .collect::<Vec<_>>(),
            vec![0, 4, 30]
        );
    }

    #[test]
    fn test_scenario_would_like() {
        let result = analyze("I would like to explain.", 1.0);
        assert_eq!(result.total_filler_words, 0);
        assert_eq!(result.detection_accuracy, 0);
    }

    #[test]
    fn test_scenario_was_like() {
        let result = analyze("She was like really happy.", 1.0);
        assert_eq!(result.total_filler_words, 0);
    }

    #[test]
    fn test_scenario_empty_transcript() {
        let result = analyze("", 1.0);
        assert_eq!(result.total_filler_words, 0);
        assert_eq!(result.fillers_per_minute, 0.0);
        assert_eq!(result.detection_accuracy, 100);
        assert_eq!(result.distribution_analysis, DistributionAnalysis::default());
        assert!(result.specific_filler_counts.is_empty());
        assert!(result.filler_positions.is_empty());
    }

    #[test]
    fn test_scenario_zero_duration() {
        let result = analyze("um uh um", 0.0);
        assert_eq!(result.total_filler_words, 3);
        assert_eq!(result.fillers_per_minute, 0.0);

        let result = analyze("um uh um", -2.0);
        assert_eq!(result.fillers_per_minute, 0.0);
        assert!(result.fillers_per_minute.is_finite());
    }

    #[test]
    fn test_counts_sum_to_total() {
        for sample in SAMPLES {
            let result = analyze(sample, 1.5);
            assert_eq!(result.category_counts.total(), result.total_filler_words, "{sample}");
            assert_eq!(
                result.specific_filler_counts.values().sum::<usize>(),
                result.total_filler_words,
                "{sample}"
            );
            assert_eq!(
                result.distribution_analysis.total(),
                result.total_filler_words,
                "{sample}"
            );
        }
    }

    #[test]
    fn test_positions_in_bounds_and_disjoint() {
        for sample in SAMPLES {
            let result = analyze(sample, 1.0);
            let len = sample.chars().count();
            for pair in result.filler_positions.windows(2) {
                assert!(pair[0].end() <= pair[1].position, "{sample}");
            }
            for filler in &result.filler_positions {
                assert!(filler.end() <= len, "{sample}");
            }
        }
    }

    #[test]
    fn test_accuracy_in_range() {
        for sample in SAMPLES {
            let result = analyze(sample, 1.0);
            assert!(result.detection_accuracy <= 100);
        }
        assert_eq!(analyze("The quick brown fox", 1.0).detection_accuracy, 100);
    }

    #[test]
    fn test_analysis_is_deterministic() {
        for sample in SAMPLES {
            assert_eq!(analyze(sample, 2.5), analyze(sample, 2.5));
        }
    }

    #[test]
    fn test_specific_counts_keyed_by_lowercase_text() {
        let result = analyze("UM um Um, hmm", 1.0);
        assert_eq!(result.specific_filler_counts.get("um"), Some(&3));
        assert_eq!(result.specific_filler_counts.get("hmm"), Some(&1));
    }

    #[test]
    fn test_positions_are_char_offsets_for_unicode_text() {
        let text = "Café naïve — um, like, you know… so that's it";
        let result = analyze(text, 1.0);
        let um = &result.filler_positions[0];
        assert_eq!(um.word, "um");
        assert_eq!(um.position, 13);
        assert_eq!(text.chars().skip(um.position).take(2).collect::<String>(), "um");
    }

    #[test]
    fn test_unicode_look_alikes_are_ignored() {
        let result = analyze("\u{17f}o I went", 1.0);
        assert_eq!(result.total_filler_words, 0);
        assert!(result.filler_positions.is_empty());
        assert_eq!(result.detection_accuracy, 100);
    }

    #[test]
    fn test_highlight_segments_from_result() {
        let text = "Um, so I think, like, this is kind of great.";
        let result = analyze(text, 1.0);
        let segments = highlight_segments(text, &result.filler_positions);
        let fillers: Vec<&str> = segments
            .iter()
            .filter(|s| s.kind == SegmentKind::Filler)
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(fillers, vec!["Um", "so", "kind of"]);
    }

    #[test]
    fn test_result_serializes_with_camel_case() {
        let result = analyze("um, so", 1.0);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["totalFillerWords"], 2);
        assert_eq!(json["categoryCounts"]["hesitation"], 1);
        assert!(json["patterns"]["positionPatterns"]["startOfSpeech"].is_number());
        assert!(json["patterns"]["contextPatterns"]["whenAnswering"].is_number());
        assert!(json["distributionAnalysis"]["beginning"].is_number());
    }

    #[test]
    fn test_duration_from_seconds() {
        let settings = AnalyzerSettings::default();
        assert_eq!(duration_minutes_from_seconds(120.0, &settings), 2.0);
        assert_eq!(duration_minutes_from_seconds(3.0, &settings), 0.1);
        assert_eq!(duration_minutes_from_seconds(0.0, &settings), 0.1);
        assert_eq!(duration_minutes_from_seconds(f64::NAN, &settings), 0.1);
    }
}
