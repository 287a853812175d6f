use clap::Parser;
use std::path::PathBuf;

use crate::filler_detector::duration_minutes_from_seconds;
use crate::settings::AnalyzerSettings;

#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "filler-coach",
    about = "Filler Coach - filler word analysis for speech transcripts"
)]
pub struct CliArgs {
    /// Transcript file to analyze (reads stdin when omitted)
    pub transcript: Option<PathBuf>,

    /// Spoken duration in minutes
    #[arg(long, allow_hyphen_values = true, conflicts_with = "seconds")]
    pub minutes: Option<f64>,

    /// Recording length in seconds, converted to minutes with the configured floor
    #[arg(long, allow_hyphen_values = true)]
    pub seconds: Option<f64>,

    /// JSON file with analyzer settings
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Number of most frequent fillers to list (defaults to the settings value)
    #[arg(long)]
    pub top: Option<usize>,

    /// Include the transcript split into plain and filler segments
    #[arg(long)]
    pub highlight: bool,

    /// Pretty-print the JSON report
    #[arg(long)]
    pub pretty: bool,

    /// Enable debug mode with verbose logging
    #[arg(long)]
    pub debug: bool,
}

impl CliArgs {
    /// Duration to analyze with: `--minutes` as given, else `--seconds`
    /// converted, else one minute.
    pub fn duration_minutes(&self, settings: &AnalyzerSettings) -> f64 {
        match (self.minutes, self.seconds) {
            (Some(minutes), _) => minutes,
            (None, Some(seconds)) => duration_minutes_from_seconds(seconds, settings),
            (None, None) => 1.0,
        }
    }

    pub fn top_limit(&self, settings: &AnalyzerSettings) -> usize {
        self.top.unwrap_or(settings.top_filler_limit)
    }
}
