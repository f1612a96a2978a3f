//! Processor trait definition.

use crate::types::DateRecord;

/// Metadata about a processor for help/documentation.
#[derive(Debug, Clone)]
pub struct ProcessorInfo {
    /// Unique identifier (e.g., "date")
    pub id: &'static str,
    /// Human-readable name (e.g., "Date")
    pub name: &'static str,
    /// Short description
    pub description: &'static str,
    /// Example input strings
    pub examples: &'static [&'static str],
}

/// A tag-then-verbalize normalization step.
///
/// Tagging turns a raw span into structured records; verbalizing turns one
/// record into spoken text. Implementations are built once and shared.
pub trait Processor: Send + Sync {
    /// Unique identifier for this processor, also the record envelope name.
    fn id(&self) -> &'static str;

    /// Human-readable name (e.g., "Date").
    fn name(&self) -> &'static str;

    /// Get processor metadata for help/documentation.
    fn info(&self) -> ProcessorInfo {
        ProcessorInfo {
            id: self.id(),
            name: self.name(),
            description: "",
            examples: &[],
        }
    }

    /// Classify one candidate span. Empty when the span is not recognized.
    fn tag(&self, input: &str) -> Vec<DateRecord>;

    /// Render one record as spoken text, preferred form first.
    fn verbalize(&self, record: &DateRecord) -> Vec<String>;

    /// Tag `input` and verbalize every record, dropping duplicate renderings.
    fn normalize(&self, input: &str) -> Vec<String> {
        let mut spoken: Vec<String> = Vec::new();
        for record in self.tag(input) {
            for text in self.verbalize(&record) {
                if !spoken.contains(&text) {
                    spoken.push(text);
                }
            }
        }
        spoken
    }
}
