use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::catalog::FillerCategory;
use super::matcher::RawMatch;

/// Flagged filler count per category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub hesitation: usize,
    pub discourse: usize,
    pub temporal: usize,
    pub thinking: usize,
}

impl CategoryCounts {
    pub fn get(&self, category: FillerCategory) -> usize {
        match category {
            FillerCategory::Hesitation => self.hesitation,
            FillerCategory::Discourse => self.discourse,
            FillerCategory::Temporal => self.temporal,
            FillerCategory::Thinking => self.thinking,
        }
    }

    fn increment(&mut self, category: FillerCategory) {
        let slot = match category {
            FillerCategory::Hesitation => &mut self.hesitation,
            FillerCategory::Discourse => &mut self.discourse,
            FillerCategory::Temporal => &mut self.temporal,
            FillerCategory::Thinking => &mut self.thinking,
        };
        *slot += 1;
    }

    pub fn total(&self) -> usize {
        FillerCategory::ALL.iter().map(|&c| self.get(c)).sum()
    }

    /// Percentage of all flagged fillers in `category` (0.0 - 100.0)
    pub fn share(&self, category: FillerCategory) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.get(category) as f64 / total as f64 * 100.0
    }

    /// Counts in category declaration order
    pub fn iter(&self) -> impl Iterator<Item = (FillerCategory, usize)> + '_ {
        FillerCategory::ALL.iter().map(move |&c| (c, self.get(c)))
    }
}

/// Fillers in the first, middle and last third of the transcript
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionAnalysis {
    pub beginning: usize,
    pub middle: usize,
    pub end: usize,
}

impl DistributionAnalysis {
    /// Bucket char offsets against `len / 3` and `2 * len / 3`.
    pub fn compute(transcript_len: usize, positions: impl IntoIterator<Item = usize>) -> Self {
        let mut distribution = Self::default();
        if transcript_len == 0 {
            return distribution;
        }

        let third = transcript_len as f64 / 3.0;
        for pos in positions {
            let pos = pos as f64;
            if pos < third {
                distribution.beginning += 1;
            } else if pos < 2.0 * third {
                distribution.middle += 1;
            } else {
                distribution.end += 1;
            }
        }
        distribution
    }

    pub fn total(&self) -> usize {
        self.beginning + self.middle + self.end
    }

    /// One-sentence description of where fillers cluster.
    pub fn insight(&self) -> &'static str {
        let max = self.beginning.max(self.middle).max(self.end);
        if self.total() == 0 {
            "No fillers detected."
        } else if self.beginning == self.middle && self.middle == self.end {
            "Fillers are spread evenly through your speech."
        } else if max == self.beginning {
            "You use more fillers at the beginning. Consider pausing to gather your thoughts before starting."
        } else if max == self.middle {
            "Most fillers appear in the middle. Practicing mid-speech pauses could help."
        } else {
            "You use more fillers toward the end. Try wrapping up with a clear conclusion."
        }
    }
}

/// Tallies over the flagged fillers of one transcript
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FillerTally {
    pub total: usize,
    pub fillers_per_minute: f64,
    pub category_counts: CategoryCounts,
    /// Keyed by the lowercased matched text
    pub specific_counts: BTreeMap<String, usize>,
    pub distribution: DistributionAnalysis,
}

/// Fillers per minute, or 0 when the duration is not a positive finite number.
pub fn fillers_per_minute(total: usize, duration_minutes: f64) -> f64 {
    if duration_minutes > 0.0 && duration_minutes.is_finite() {
        total as f64 / duration_minutes
    } else {
        0.0
    }
}

pub fn tally(flagged: &[RawMatch], transcript_len: usize, duration_minutes: f64) -> FillerTally {
    let mut category_counts = CategoryCounts::default();
    let mut specific_counts: BTreeMap<String, usize> = BTreeMap::new();

    for m in flagged {
        category_counts.increment(m.category);
        *specific_counts
            .entry(m.matched_text.to_lowercase())
            .or_insert(0) += 1;
    }

    FillerTally {
        total: flagged.len(),
        fillers_per_minute: fillers_per_minute(flagged.len(), duration_minutes),
        category_counts,
        specific_counts,
        distribution: DistributionAnalysis::compute(
            transcript_len,
            flagged.iter().map(|m| m.start),
        ),
    }
}
