//! Lexical tables: numbers, month names, day ordinals and era suffixes.
//!
//! Tables are flat TSV files (`surface<TAB>spoken`, one entry per line, `#`
//! comments allowed). The copies under `data/` are embedded into the binary
//! and parsed once per process; [`Tables::from_dir`] loads a replacement set
//! with the same layout.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// `(surface, spoken)` pairs in file order.
pub type Labels = Vec<(String, String)>;

/// Errors that can occur while loading lexical tables.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// Table file could not be read.
    #[error("failed to read table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line is missing its tab-separated spoken form.
    #[error("malformed entry in {table} at line {line}: {content:?}")]
    Malformed {
        table: &'static str,
        line: usize,
        content: String,
    },

    /// A table has no entries at all.
    #[error("table {0} has no entries")]
    Empty(&'static str),

    /// A table lacks an entry the grammars depend on.
    #[error("table {table} is missing required entry {entry:?}")]
    Missing { table: &'static str, entry: String },
}

/// Table files, relative to the data directory.
const FILES: &[(&str, &str)] = &[
    ("digit", "number/digit.tsv"),
    ("zero", "number/zero.tsv"),
    ("teen", "number/teen.tsv"),
    ("ty", "number/ty.tsv"),
    ("month_name", "date/month_name.tsv"),
    ("month_abbr", "date/month_abbr.tsv"),
    ("month_number", "date/month_number.tsv"),
    ("day", "date/day.tsv"),
    ("day_suffix", "date/day_suffix.tsv"),
    ("year_suffix", "date/year_suffix.tsv"),
];

const EMBEDDED: &[&str] = &[
    include_str!("../data/number/digit.tsv"),
    include_str!("../data/number/zero.tsv"),
    include_str!("../data/number/teen.tsv"),
    include_str!("../data/number/ty.tsv"),
    include_str!("../data/date/month_name.tsv"),
    include_str!("../data/date/month_abbr.tsv"),
    include_str!("../data/date/month_number.tsv"),
    include_str!("../data/date/day.tsv"),
    include_str!("../data/date/day_suffix.tsv"),
    include_str!("../data/date/year_suffix.tsv"),
];

/// All lexical tables used by the date grammars.
#[derive(Debug, Clone)]
pub struct Tables {
    /// 1-9
    pub digit: Labels,
    /// 0
    pub zero: Labels,
    /// 10-19
    pub teen: Labels,
    /// Tens digit 2-9 to its tens word.
    pub ty: Labels,
    pub month_name: Labels,
    pub month_abbr: Labels,
    /// 1-12 and zero-padded 01-09.
    pub month_number: Labels,
    /// Cardinal day word to ordinal day word, days 1-31.
    pub day: Labels,
    pub day_suffix: Vec<String>,
    pub year_suffix: Labels,
}

impl Tables {
    /// The tables shipped with the crate.
    ///
    /// Parsed on first use and shared for the rest of the process. The
    /// embedded files are checked by `test_embedded_tables_parse`, so a
    /// failure here is a broken build, not a runtime condition.
    pub fn embedded() -> &'static Tables {
        static TABLES: OnceLock<Tables> = OnceLock::new();
        TABLES.get_or_init(|| match Self::from_sources(EMBEDDED.iter().copied()) {
            Ok(tables) => tables,
            Err(e) => panic!("embedded tables are invalid: {e}"),
        })
    }

    /// Load every table file from `dir`, using the same layout as `data/`.
    pub fn from_dir(dir: &Path) -> Result<Self, TableError> {
        let mut contents = Vec::with_capacity(FILES.len());
        for (_, relative) in FILES {
            let path = dir.join(relative);
            let text = fs::read_to_string(&path).map_err(|source| TableError::Io {
                path: path.clone(),
                source,
            })?;
            contents.push(text);
        }
        tracing::debug!("Loaded {} table files from {}", contents.len(), dir.display());
        Self::from_sources(contents.iter().map(String::as_str))
    }

    fn from_sources<'a, I>(sources: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut sources = FILES.iter().map(|(name, _)| *name).zip(sources);
        let mut next = || sources.next().ok_or(TableError::Empty("missing table source"));

        let (name, text) = next()?;
        let digit = parse_labels(name, text)?;
        let (name, text) = next()?;
        let zero = parse_labels(name, text)?;
        let (name, text) = next()?;
        let teen = parse_labels(name, text)?;
        let (name, text) = next()?;
        let ty = parse_labels(name, text)?;
        let (name, text) = next()?;
        let month_name = parse_labels(name, text)?;
        let (name, text) = next()?;
        let month_abbr = parse_labels(name, text)?;
        let (name, text) = next()?;
        let month_number = parse_labels(name, text)?;
        let (name, text) = next()?;
        let day = parse_labels(name, text)?;
        let (name, text) = next()?;
        let day_suffix = parse_list(name, text)?;
        let (name, text) = next()?;
        let year_suffix = parse_labels(name, text)?;

        let tables = Self {
            digit,
            zero,
            teen,
            ty,
            month_name,
            month_abbr,
            month_number,
            day,
            day_suffix,
            year_suffix,
        };
        tables.check_required()?;
        Ok(tables)
    }

    /// Every digit, teen, tens digit and month number the grammars spell,
    /// plus one day entry per day of the month.
    fn check_required(&self) -> Result<(), TableError> {
        let numbers = |range: std::ops::RangeInclusive<u8>| range.map(|n| n.to_string());
        require("digit", &self.digit, numbers(1..=9))?;
        require("zero", &self.zero, numbers(0..=0))?;
        require("teen", &self.teen, numbers(10..=19))?;
        require("ty", &self.ty, numbers(2..=9))?;
        require("month_number", &self.month_number, numbers(1..=12))?;
        if self.day.len() < 31 {
            return Err(TableError::Missing {
                table: "day",
                entry: format!("day {}", self.day.len() + 1),
            });
        }
        Ok(())
    }

    /// Month names in lower, Capitalized and UPPER case.
    pub fn month_names_with_case(&self) -> Labels {
        with_case_variants(&self.month_name)
    }

    /// Month abbreviations in lower, Capitalized and UPPER case.
    pub fn month_abbrs_with_case(&self) -> Labels {
        with_case_variants(&self.month_abbr)
    }

    /// Ordinal day suffixes in lower and UPPER case.
    pub fn day_suffixes_with_case(&self) -> Vec<String> {
        let mut out = self.day_suffix.clone();
        for suffix in &self.day_suffix {
            let upper = suffix.to_uppercase();
            if !out.contains(&upper) {
                out.push(upper);
            }
        }
        out
    }

    /// Era suffixes, plus a variant that keeps the trailing period in the
    /// spoken form for every surface form ending in ".".
    pub fn year_suffixes_with_punct(&self) -> Labels {
        let mut out = self.year_suffix.clone();
        for (surface, spoken) in &self.year_suffix {
            if surface.ends_with('.') && !spoken.ends_with('.') {
                out.push((surface.clone(), format!("{spoken}.")));
            }
        }
        out
    }

    /// Canonical month words in calendar order.
    pub fn month_words(&self) -> Vec<&str> {
        let mut words: Vec<&str> = Vec::new();
        for (_, spoken) in &self.month_name {
            if !words.contains(&spoken.as_str()) {
                words.push(spoken);
            }
        }
        words
    }

    /// Cardinal day words, "one" through "thirty one".
    pub fn day_words(&self) -> Vec<&str> {
        self.day.iter().map(|(cardinal, _)| cardinal.as_str()).collect()
    }

    /// Month word for a month number (1-12).
    pub fn month_word(&self, number: u8) -> Option<&str> {
        let key = number.to_string();
        self.month_number
            .iter()
            .find(|(surface, _)| *surface == key)
            .map(|(_, spoken)| spoken.as_str())
    }

    /// Month number for a canonical month word.
    pub fn month_number_of(&self, word: &str) -> Option<u8> {
        self.month_number
            .iter()
            .filter(|(_, spoken)| spoken == word)
            .filter_map(|(surface, _)| surface.parse::<u8>().ok())
            .min()
    }
}

fn require(
    table: &'static str,
    labels: &Labels,
    surfaces: impl IntoIterator<Item = String>,
) -> Result<(), TableError> {
    for surface in surfaces {
        if !labels.iter().any(|(s, _)| *s == surface) {
            return Err(TableError::Missing {
                table,
                entry: surface,
            });
        }
    }
    Ok(())
}

fn parse_labels(table: &'static str, text: &str) -> Result<Labels, TableError> {
    let mut labels = Labels::new();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim_end_matches('\r');
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let (surface, spoken) = line.split_once('\t').ok_or_else(|| TableError::Malformed {
            table,
            line: index + 1,
            content: line.to_string(),
        })?;
        if surface.is_empty() || spoken.is_empty() {
            return Err(TableError::Malformed {
                table,
                line: index + 1,
                content: line.to_string(),
            });
        }
        labels.push((surface.to_string(), spoken.to_string()));
    }
    if labels.is_empty() {
        return Err(TableError::Empty(table));
    }
    Ok(labels)
}

fn parse_list(table: &'static str, text: &str) -> Result<Vec<String>, TableError> {
    let items: Vec<String> = text
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.split('\t').next().unwrap_or(line).to_string())
        .collect();
    if items.is_empty() {
        return Err(TableError::Empty(table));
    }
    Ok(items)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn with_case_variants(labels: &Labels) -> Labels {
    let mut out = Labels::new();
    for (surface, spoken) in labels {
        for variant in [surface.clone(), capitalize(surface), surface.to_uppercase()] {
            let pair = (variant, spoken.clone());
            if !out.contains(&pair) {
                out.push(pair);
            }
        }
    }
    out
}
