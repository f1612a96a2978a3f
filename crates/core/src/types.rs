//! Core types for datespeak.
//!
//! The tagged date record is the value passed from the tagger to the
//! verbalizer. On the wire it is a single line:
//!
//! ```text
//! date { month: "january" day: "five" year: "twenty twelve" preserve_order: "true" }
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Token name that wraps every record.
pub const RECORD_NAME: &str = "date";

/// Operating mode of the tagger and verbalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Exactly one interpretation per input.
    #[default]
    Single,
    /// Every valid interpretation, for downstream ranking.
    Multi,
}

impl OutputMode {
    #[must_use]
    pub fn is_single(self) -> bool {
        self == Self::Single
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Single => "single",
            Self::Multi => "multi",
        })
    }
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" | "deterministic" => Ok(Self::Single),
            "multi" | "multiple" => Ok(Self::Multi),
            other => Err(format!("unknown output mode: {other}")),
        }
    }
}

/// Name of a value-carrying record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldName {
    Month,
    Day,
    Year,
    /// Financial period phrase ("first half").
    Text,
}

impl FieldName {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::Day => "day",
            Self::Year => "year",
            Self::Text => "text",
        }
    }

    fn parse(name: &str) -> Option<Self> {
        match name {
            "month" => Some(Self::Month),
            "day" => Some(Self::Day),
            "year" => Some(Self::Year),
            "text" => Some(Self::Text),
            _ => None,
        }
    }
}

/// Explicit rendering order for the month and day fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldOrder {
    /// "february fourth"
    #[serde(rename = "md")]
    MonthFirst,
    /// "the fourth of february"
    #[serde(rename = "dm")]
    DayFirst,
}

impl FieldOrder {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MonthFirst => "md",
            Self::DayFirst => "dm",
        }
    }
}

/// One `name: "value"` pair. Values are already spoken words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: FieldName,
    pub value: String,
}

/// A tagged date record.
///
/// Fields keep insertion order. The two order flags are independent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRecord {
    fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub preserve_order: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_order: Option<FieldOrder>,
}

impl DateRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field, replacing any earlier field with the same name.
    #[must_use]
    pub fn with(mut self, name: FieldName, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    #[must_use]
    pub fn with_preserve_order(mut self, preserve: bool) -> Self {
        self.preserve_order = preserve;
        self
    }

    #[must_use]
    pub fn with_field_order(mut self, order: Option<FieldOrder>) -> Self {
        self.field_order = order;
        self
    }

    pub fn push(&mut self, name: FieldName, value: impl Into<String>) {
        self.fields.retain(|f| f.name != name);
        self.fields.push(Field {
            name,
            value: value.into(),
        });
    }

    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    #[must_use]
    pub fn get(&self, name: FieldName) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }

    /// Index of a field in insertion order.
    #[must_use]
    pub fn position(&self, name: FieldName) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    #[must_use]
    pub fn month(&self) -> Option<&str> {
        self.get(FieldName::Month)
    }

    #[must_use]
    pub fn day(&self) -> Option<&str> {
        self.get(FieldName::Day)
    }

    #[must_use]
    pub fn year(&self) -> Option<&str> {
        self.get(FieldName::Year)
    }

    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.get(FieldName::Text)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for DateRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{RECORD_NAME} {{")?;
        for field in &self.fields {
            write!(f, " {}: \"{}\"", field.name.as_str(), field.value)?;
        }
        if self.preserve_order {
            f.write_str(" preserve_order: \"true\"")?;
        }
        if let Some(order) = self.field_order {
            write!(f, " field_order: \"{}\"", order.as_str())?;
        }
        f.write_str(" }")
    }
}

/// Errors from parsing the record text protocol.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordParseError {
    #[error("record must look like `date {{ ... }}`: {0:?}")]
    Envelope(String),

    #[error("unexpected text in record body: {0:?}")]
    Syntax(String),

    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("field {0} has an empty value")]
    EmptyValue(&'static str),

    #[error("invalid value for {field}: {value:?}")]
    InvalidFlag { field: &'static str, value: String },
}

fn field_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"\s*([a-z_]+):\s*"([^"]*)""#).unwrap())
}

impl FromStr for DateRecord {
    type Err = RecordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let envelope = || RecordParseError::Envelope(s.to_string());
        let body = s
            .trim()
            .strip_prefix(RECORD_NAME)
            .map(str::trim_start)
            .and_then(|rest| rest.strip_prefix('{'))
            .and_then(|rest| rest.trim_end().strip_suffix('}'))
            .ok_or_else(envelope)?;

        let mut record = Self::new();
        let mut consumed = 0;
        for caps in field_pattern().captures_iter(body) {
            let Some(whole) = caps.get(0) else { continue };
            if whole.start() != consumed {
                return Err(RecordParseError::Syntax(body[consumed..whole.start()].to_string()));
            }
            consumed = whole.end();

            let name = &caps[1];
            let value = &caps[2];
            match name {
                "preserve_order" => {
                    if value != "true" {
                        return Err(RecordParseError::InvalidFlag {
                            field: "preserve_order",
                            value: value.to_string(),
                        });
                    }
                    record.preserve_order = true;
                }
                "field_order" => {
                    record.field_order = Some(match value {
                        "md" => FieldOrder::MonthFirst,
                        "dm" => FieldOrder::DayFirst,
                        _ => {
                            return Err(RecordParseError::InvalidFlag {
                                field: "field_order",
                                value: value.to_string(),
                            })
                        }
                    });
                }
                _ => {
                    let field = FieldName::parse(name)
                        .ok_or_else(|| RecordParseError::UnknownField(name.to_string()))?;
                    if value.trim().is_empty() {
                        return Err(RecordParseError::EmptyValue(field.as_str()));
                    }
                    record.push(field, value);
                }
            }
        }

        let rest = body[consumed..].trim();
        if !rest.is_empty() {
            return Err(RecordParseError::Syntax(rest.to_string()));
        }
        Ok(record)
    }
}

/// Complete result for one input span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationResult {
    pub input: String,
    pub mode: OutputMode,
    pub records: Vec<DateRecord>,
    /// Spoken renderings, preferred first.
    pub spoken: Vec<String>,
}

impl NormalizationResult {
    /// The preferred spoken rendering, if the input was recognized.
    #[must_use]
    pub fn best(&self) -> Option<&str> {
        self.spoken.first().map(String::as_str)
    }
}
