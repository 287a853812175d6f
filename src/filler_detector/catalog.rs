use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic group a filler belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillerCategory {
    Hesitation,
    Discourse,
    Temporal,
    Thinking,
}

impl FillerCategory {
    /// All categories in declaration order
    pub const ALL: [FillerCategory; 4] = [
        FillerCategory::Hesitation,
        FillerCategory::Discourse,
        FillerCategory::Temporal,
        FillerCategory::Thinking,
    ];

    /// Canonical lowercase fillers for this category
    pub fn fillers(self) -> &'static [&'static str] {
        match self {
            // Hesitation sounds
            FillerCategory::Hesitation => &["um", "uh", "er", "ah", "hmm"],
            // Discourse markers
            FillerCategory::Discourse => &[
                "like",
                "you know",
                "i mean",
                "sort of",
                "kind of",
                "basically",
                "actually",
                "literally",
            ],
            // Time / sequencing words used as stalls
            FillerCategory::Temporal => &["so", "well", "now", "then", "okay", "alright"],
            // Spoken thinking out loud
            FillerCategory::Thinking => &["let me think", "let me see", "how do i say"],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FillerCategory::Hesitation => "hesitation",
            FillerCategory::Discourse => "discourse",
            FillerCategory::Temporal => "temporal",
            FillerCategory::Thinking => "thinking",
        }
    }

    /// Human readable label
    pub fn label(self) -> &'static str {
        match self {
            FillerCategory::Hesitation => "Hesitation",
            FillerCategory::Discourse => "Discourse",
            FillerCategory::Temporal => "Temporal",
            FillerCategory::Thinking => "Thinking",
        }
    }
}

impl fmt::Display for FillerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `(phrase, category)` pair from the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub phrase: &'static str,
    pub category: FillerCategory,
}

/// Catalog entries sorted by descending phrase length so that multi-word
/// phrases are scanned before their constituent words. The sort is stable,
/// so equal lengths keep category/declaration order.
static ENTRIES_BY_LENGTH: Lazy<Vec<CatalogEntry>> = Lazy::new(|| {
    let mut entries: Vec<CatalogEntry> = FillerCategory::ALL
        .iter()
        .flat_map(|&category| {
            category
                .fillers()
                .iter()
                .map(move |&phrase| CatalogEntry { phrase, category })
        })
        .collect();
    entries.sort_by(|a, b| b.phrase.len().cmp(&a.phrase.len()));
    entries
});

pub fn entries_by_length() -> &'static [CatalogEntry] {
    &ENTRIES_BY_LENGTH
}
