pub mod cli;
pub mod filler_detector;
pub mod logging;
pub mod settings;

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;
use std::fs;
use std::io::{self, Read, Write};

use cli::CliArgs;
use filler_detector::{
    analyze_with_settings, highlight_segments, CategoryShare, FillerAnalysisResult,
    FillerWordCount, TranscriptSegment,
};
use settings::AnalyzerSettings;

pub use filler_detector::{analyze, FillerCategory};

/// Document printed by the command-line front end
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CliReport {
    pub analysis: FillerAnalysisResult,
    pub top_fillers: Vec<FillerWordCount>,
    pub category_breakdown: Vec<CategoryShare>,
    pub distribution_insight: String,
    /// Present only when highlighting was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<TranscriptSegment>>,
}

pub fn build_report(
    transcript: &str,
    duration_minutes: f64,
    settings: &AnalyzerSettings,
    top_limit: usize,
    highlight: bool,
) -> CliReport {
    let analysis = analyze_with_settings(transcript, duration_minutes, settings);
    let segments = highlight.then(|| highlight_segments(transcript, &analysis.filler_positions));
    CliReport {
        top_fillers: analysis.top_fillers(top_limit),
        category_breakdown: analysis.category_breakdown(),
        distribution_insight: analysis.distribution_analysis.insight().to_string(),
        segments,
        analysis,
    }
}

fn read_transcript(args: &CliArgs) -> Result<String> {
    match &args.transcript {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read transcript {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read transcript from stdin")?;
            Ok(text)
        }
    }
}

pub fn run(args: CliArgs) -> Result<()> {
    logging::init_logging(args.debug);

    let settings = settings::load_or_default(args.settings.as_deref())?;
    let transcript = read_transcript(&args)?;
    let duration_minutes = args.duration_minutes(&settings);

    info!(
        "Analyzing {} chars over {:.2} minutes",
        transcript.chars().count(),
        duration_minutes
    );

    let report = build_report(
        &transcript,
        duration_minutes,
        &settings,
        args.top_limit(&settings),
        args.highlight,
    );
    info!("{}", report.analysis.detection_summary);

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    }
    .context("Failed to serialize report")?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", json).context("Failed to write report")?;
    Ok(())
}
