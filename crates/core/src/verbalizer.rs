//! Date verbalizer: tagged records to spoken text.

use std::sync::Arc;

use crate::numeral::Numeral;
use crate::types::{DateRecord, FieldName, FieldOrder, OutputMode};

/// Renders tagged date records as spoken text.
///
/// The month/day layout comes from the record's `field_order` flag when it is
/// set, otherwise from the literal position of the day and month fields.
/// `preserve_order` only affects downstream reordering and is never spoken.
#[derive(Clone)]
pub struct DateVerbalizer {
    numeral: Arc<dyn Numeral>,
    mode: OutputMode,
}

impl std::fmt::Debug for DateVerbalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DateVerbalizer")
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

/// A year value as spoken; the tagger keeps a leading comma from "jan. 5, 2012".
fn spoken_year(value: &str) -> &str {
    value.trim_start_matches([',', ' '])
}

fn join(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

impl DateVerbalizer {
    pub fn new(numeral: Arc<dyn Numeral>, mode: OutputMode) -> Self {
        Self { numeral, mode }
    }

    #[must_use]
    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Every spoken rendering of `record`, preferred first.
    ///
    /// Single-output mode yields at most one rendering; an unrenderable record
    /// (day without month, financial text mixed with month or day, no fields)
    /// yields none.
    pub fn verbalize(&self, record: &DateRecord) -> Vec<String> {
        let mut outputs = self.render(record);
        if self.mode.is_single() {
            outputs.truncate(1);
        }
        tracing::trace!("Verbalized {} into {} form(s)", record, outputs.len());
        outputs
    }

    fn render(&self, record: &DateRecord) -> Vec<String> {
        let year = record.year().map(spoken_year).filter(|y| !y.is_empty());
        let year = year.unwrap_or_default();

        if let Some(text) = record.text() {
            if record.month().is_some() || record.day().is_some() {
                return vec![];
            }
            return vec![join(&["the", text, "of", year])];
        }

        let Some(month) = record.month() else {
            return match (record.day(), year) {
                (None, year) if !year.is_empty() => vec![year.to_string()],
                _ => vec![],
            };
        };

        let Some(day) = record.day() else {
            return vec![join(&[month, year])];
        };
        let Some(ordinal) = self.numeral.ordinal(day) else {
            return vec![];
        };

        let layout = record.field_order.unwrap_or_else(|| {
            match (record.position(FieldName::Day), record.position(FieldName::Month)) {
                (Some(d), Some(m)) if d < m => FieldOrder::DayFirst,
                _ => FieldOrder::MonthFirst,
            }
        });

        match layout {
            FieldOrder::MonthFirst => {
                let mut outputs = vec![join(&[month, ordinal.as_str(), year])];
                // may 5 -> may five
                if self.mode == OutputMode::Multi {
                    let cardinal = join(&[month, day, year]);
                    if !outputs.contains(&cardinal) {
                        outputs.push(cardinal);
                    }
                }
                outputs
            }
            FieldOrder::DayFirst => {
                vec![join(&["the", ordinal.as_str(), "of", month, year])]
            }
        }
    }

    /// Parse a record line and render it.
    pub fn verbalize_str(&self, line: &str) -> Result<Vec<String>, crate::types::RecordParseError> {
        let record: DateRecord = line.parse()?;
        Ok(self.verbalize(&record))
    }
}
