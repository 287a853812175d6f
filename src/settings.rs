use anyhow::{Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tunable thresholds of the analyzer. The defaults are the values the
/// coaching app ships with.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AnalyzerSettings {
    /// Fillers before this fraction of the transcript count as start of speech
    #[serde(default = "default_start_of_speech_ratio")]
    pub start_of_speech_ratio: f64,
    /// Fillers at or after this fraction count as end of speech
    #[serde(default = "default_end_of_speech_ratio")]
    pub end_of_speech_ratio: f64,
    /// Fillers within this leading fraction count as answering
    #[serde(default = "default_answering_ratio")]
    pub answering_ratio: f64,
    #[serde(default = "default_opening_insight_share")]
    pub opening_insight_share: f64,
    #[serde(default = "default_mid_sentence_insight_share")]
    pub mid_sentence_insight_share: f64,
    #[serde(default = "default_top_filler_limit")]
    pub top_filler_limit: usize,
    /// Floor applied when converting a recording length to minutes
    #[serde(default = "default_min_duration_minutes")]
    pub min_duration_minutes: f64,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        get_default_settings()
    }
}

impl AnalyzerSettings {
    /// Clamp ratios into `[0, 1]`, keep start <= end and the duration floor
    /// positive.
    pub fn sanitized(mut self) -> Self {
        let original = self.clone();

        for ratio in [
            &mut self.start_of_speech_ratio,
            &mut self.end_of_speech_ratio,
            &mut self.answering_ratio,
            &mut self.opening_insight_share,
            &mut self.mid_sentence_insight_share,
        ] {
            *ratio = if ratio.is_nan() {
                0.0
            } else {
                (*ratio).clamp(0.0, 1.0)
            };
        }

        if self.start_of_speech_ratio > self.end_of_speech_ratio {
            std::mem::swap(&mut self.start_of_speech_ratio, &mut self.end_of_speech_ratio);
        }

        let floor = self.min_duration_minutes;
        if floor.is_nan() || floor <= 0.0 || floor.is_infinite() {
            self.min_duration_minutes = default_min_duration_minutes();
        }

        if self != original {
            warn!(
                "Adjusted out-of-range analyzer settings: {:?} -> {:?}",
                original, self
            );
        }

        self
    }
}

fn default_start_of_speech_ratio() -> f64 {
    0.2
}

fn default_end_of_speech_ratio() -> f64 {
    0.8
}

fn default_answering_ratio() -> f64 {
    0.15
}

fn default_opening_insight_share() -> f64 {
    0.40
}

fn default_mid_sentence_insight_share() -> f64 {
    0.40
}

fn default_top_filler_limit() -> usize {
    5
}

fn default_min_duration_minutes() -> f64 {
    0.1
}

pub fn get_default_settings() -> AnalyzerSettings {
    AnalyzerSettings {
        start_of_speech_ratio: default_start_of_speech_ratio(),
        end_of_speech_ratio: default_end_of_speech_ratio(),
        answering_ratio: default_answering_ratio(),
        opening_insight_share: default_opening_insight_share(),
        mid_sentence_insight_share: default_mid_sentence_insight_share(),
        top_filler_limit: default_top_filler_limit(),
        min_duration_minutes: default_min_duration_minutes(),
    }
}

/// Read settings from a JSON file. Missing fields take their defaults.
pub fn load_settings(path: &Path) -> Result<AnalyzerSettings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file {}", path.display()))?;
    let settings: AnalyzerSettings = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse settings file {}", path.display()))?;

    debug!("Loaded analyzer settings from {}: {:?}", path.display(), settings);
    Ok(settings.sanitized())
}

/// Settings from `path` if given, otherwise the defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<AnalyzerSettings> {
    match path {
        Some(path) => load_settings(path),
        None => Ok(get_default_settings()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = AnalyzerSettings::default();
        assert_eq!(settings.start_of_speech_ratio, 0.2);
        assert_eq!(settings.end_of_speech_ratio, 0.8);
        assert_eq!(settings.answering_ratio, 0.15);
        assert_eq!(settings.opening_insight_share, 0.40);
        assert_eq!(settings.mid_sentence_insight_share, 0.40);
        assert_eq!(settings.top_filler_limit, 5);
        assert_eq!(settings.min_duration_minutes, 0.1);
        assert_eq!(settings.clone().sanitized(), settings);
    }

    #[test]
    fn test_load_partial_settings_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "top_filler_limit": 3, "unknown_field": true }}"#).unwrap();

        let settings = load_settings(file.path()).unwrap();
        assert_eq!(settings.top_filler_limit, 3);
        assert_eq!(settings.end_of_speech_ratio, 0.8);
    }

    #[test]
    fn test_load_invalid_settings_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = load_settings(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse settings file"));
    }

    #[test]
    fn test_load_missing_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_settings(&dir.path().join("missing.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read settings file"));
    }

    #[test]
    fn test_load_or_default_without_path() {
        assert_eq!(load_or_default(None).unwrap(), get_default_settings());
    }

    #[test]
    fn test_sanitized_clamps_and_orders() {
        let settings = AnalyzerSettings {
            start_of_speech_ratio: 0.9,
            end_of_speech_ratio: 0.3,
            answering_ratio: -1.0,
            opening_insight_share: 2.0,
            mid_sentence_insight_share: f64::NAN,
            top_filler_limit: 5,
            min_duration_minutes: 0.0,
        }
        .sanitized();

        assert_eq!(settings.start_of_speech_ratio, 0.3);
        assert_eq!(settings.end_of_speech_ratio, 0.9);
        assert_eq!(settings.answering_ratio, 0.0);
        assert_eq!(settings.opening_insight_share, 1.0);
        assert_eq!(settings.mid_sentence_insight_share, 0.0);
        assert_eq!(settings.min_duration_minutes, 0.1);
    }
}
