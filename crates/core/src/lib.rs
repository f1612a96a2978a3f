//! Datespeak Core
//!
//! Spoken-form normalization of English dates for speech synthesis. Raw date
//! spans (`jan. 5, 2012`, `2012-01-05`, `1920s`, `1H23`) are tagged into
//! structured records and rendered back as the words a speaker would say.
//!
//! # Quick Start
//!
//! ```
//! use datespeak_core::DateNormalizer;
//!
//! let normalizer = DateNormalizer::new();
//!
//! assert_eq!(
//!     normalizer.normalize_one("jan. 5, 2012").as_deref(),
//!     Some("january fifth twenty twelve")
//! );
//!
//! // Year-first input is reordered before it is spoken
//! assert_eq!(
//!     normalizer.normalize_one("2012-01-05").as_deref(),
//!     Some("january fifth twenty twelve")
//! );
//! ```
//!
//! # Tagging and Verbalizing Separately
//!
//! ```
//! use datespeak_core::{DateNormalizer, OutputMode};
//!
//! let normalizer = DateNormalizer::with_mode(OutputMode::Multi);
//!
//! let records = normalizer.tag("05/06");
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[0].to_string(), r#"date { month: "may" day: "six" }"#);
//!
//! let spoken = normalizer.verbalize(&records[1]);
//! assert_eq!(spoken, vec!["the sixth of may".to_string()]);
//! ```

pub mod grammar;
pub mod graph;
pub mod numeral;
pub mod processor;
pub mod reorder;
pub mod tables;
pub mod tagger;
pub mod types;
pub mod verbalizer;

pub use numeral::{EnglishNumerals, Numeral};
pub use processor::{Processor, ProcessorInfo};
pub use tables::{TableError, Tables};
pub use tagger::DateTagger;
pub use types::*;
pub use verbalizer::DateVerbalizer;

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Construction options for [`DateNormalizer`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Single canonical output or every alternative.
    pub mode: OutputMode,
    /// Directory with replacement table files (same layout as `data/`).
    /// The embedded tables are used when unset.
    pub tables_dir: Option<PathBuf>,
}

/// Main entry point - a tagger and verbalizer built for one output mode.
///
/// Construction compiles every grammar and reorder lattice up front; after
/// that the normalizer is immutable and may be shared across threads.
#[derive(Debug, Clone)]
pub struct DateNormalizer {
    tagger: DateTagger,
    verbalizer: DateVerbalizer,
    mode: OutputMode,
}

impl DateNormalizer {
    /// Create a single-output normalizer over the embedded tables.
    ///
    /// # Examples
    ///
    /// ```
    /// use datespeak_core::DateNormalizer;
    ///
    /// let normalizer = DateNormalizer::new();
    /// assert_eq!(normalizer.normalize("'70s"), vec!["seventies".to_string()]);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_mode(OutputMode::Single)
    }

    #[must_use]
    pub fn with_mode(mode: OutputMode) -> Self {
        Self::from_parts(
            Tables::embedded(),
            Arc::new(EnglishNumerals::default()),
            mode,
        )
    }

    /// Create a normalizer from configuration, loading tables from disk when
    /// `tables_dir` is set.
    pub fn with_config(config: &NormalizerConfig) -> Result<Self, TableError> {
        match &config.tables_dir {
            Some(dir) => {
                let tables = Tables::from_dir(dir)?;
                let numeral = Arc::new(EnglishNumerals::from_tables(&tables));
                Ok(Self::from_parts(&tables, numeral, config.mode))
            }
            None => Ok(Self::with_mode(config.mode)),
        }
    }

    /// Create a normalizer from explicit tables and a numeral speller.
    pub fn from_parts(tables: &Tables, numeral: Arc<dyn Numeral>, mode: OutputMode) -> Self {
        Self {
            tagger: DateTagger::new(tables, Arc::clone(&numeral), mode),
            verbalizer: DateVerbalizer::new(numeral, mode),
            mode,
        }
    }

    #[must_use]
    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Tag one candidate date span.
    pub fn tag(&self, input: &str) -> Vec<DateRecord> {
        self.tagger.tag(input)
    }

    /// Render one tagged record.
    pub fn verbalize(&self, record: &DateRecord) -> Vec<String> {
        self.verbalizer.verbalize(record)
    }

    /// Parse a `date { .. }` line and render it.
    pub fn verbalize_str(&self, line: &str) -> Result<Vec<String>, RecordParseError> {
        self.verbalizer.verbalize_str(line)
    }

    /// Every spoken rendering of `input`, preferred first.
    pub fn normalize(&self, input: &str) -> Vec<String> {
        let spoken = Processor::normalize(self, input);
        tracing::trace!("Normalized {:?} into {} form(s)", input, spoken.len());
        spoken
    }

    /// The preferred spoken rendering of `input`, if it is a date.
    pub fn normalize_one(&self, input: &str) -> Option<String> {
        self.normalize(input).into_iter().next()
    }

    /// Records and renderings for `input` in one result.
    pub fn analyze(&self, input: &str) -> NormalizationResult {
        let records = self.tag(input);
        let mut spoken: Vec<String> = Vec::new();
        for record in &records {
            for text in self.verbalize(record) {
                if !spoken.contains(&text) {
                    spoken.push(text);
                }
            }
        }
        NormalizationResult {
            input: input.to_string(),
            mode: self.mode,
            records,
            spoken,
        }
    }
}

impl Default for DateNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor for DateNormalizer {
    fn id(&self) -> &'static str {
        RECORD_NAME
    }

    fn name(&self) -> &'static str {
        "Date"
    }

    fn info(&self) -> ProcessorInfo {
        ProcessorInfo {
            id: self.id(),
            name: self.name(),
            description: "Calendar dates, years, decades and financial periods",
            examples: &[
                "jan. 5, 2012",
                "5 january 2012",
                "2012-01-05",
                "13.05.12",
                "1920s",
                "'70s",
                "123 A.D.",
                "1H23",
            ],
        }
    }

    fn tag(&self, input: &str) -> Vec<DateRecord> {
        self.tagger.tag(input)
    }

    fn verbalize(&self, record: &DateRecord) -> Vec<String> {
        self.verbalizer.verbalize(record)
    }
}
