//! Sub-grammars shared by the date tagger.
//!
//! - [`decade`]: two-digit numerals ("84" -> "eighty four", "05" -> "oh five")
//! - [`year`]: four-digit, decade-plural, thousand and era-suffixed years
//! - [`period`]: financial half/quarter shorthand ("1H", "3Q")

pub mod decade;
pub mod period;
pub mod year;

use std::sync::Arc;

use crate::graph::Graph;
use crate::numeral::Numeral;
use crate::tables::Tables;

/// Table-backed leaf graphs the sub-grammars are built from.
#[derive(Debug, Clone)]
pub struct Lexicon {
    /// "1".."9" -> "one".."nine"
    pub digit: Graph,
    /// "10".."19" -> "ten".."nineteen"
    pub teen: Graph,
    /// tens digit "2".."9" -> "twenty".."ninety"
    pub ty: Graph,
    /// 1-3 digit numeral -> cardinal words
    pub cardinal: Graph,
    /// numeral spelled digit by digit
    pub single_digits: Graph,
    /// era marker -> era phrase
    pub year_suffix: Graph,
}

impl Lexicon {
    pub fn new(tables: &Tables, numeral: Arc<dyn Numeral>) -> Self {
        let for_cardinal = Arc::clone(&numeral);
        Self {
            digit: Graph::table(tables.digit.iter().cloned()),
            teen: Graph::table(tables.teen.iter().cloned()),
            ty: Graph::table(tables.ty.iter().cloned()),
            cardinal: Graph::function(move |digits| for_cardinal.cardinal(digits).into_iter().collect()),
            single_digits: Graph::function(move |digits| numeral.digits(digits).into_iter().collect()),
            year_suffix: Graph::table(tables.year_suffixes_with_punct()),
        }
    }
}

/// Pluralize a spoken decade: "twenty" -> "twenties", "hundred" -> "hundreds".
pub fn pluralize(words: &str) -> String {
    match words.strip_suffix('y') {
        Some(stem) => format!("{stem}ies"),
        None => format!("{words}s"),
    }
}
