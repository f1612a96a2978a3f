//! Numeral spell-out.
//!
//! The date grammars never decode digits into words themselves; they ask a
//! [`Numeral`] implementation. [`EnglishNumerals`] is the built-in one and is
//! backed by the number tables.

use std::collections::HashMap;

use crate::tables::Tables;

/// Cardinal and ordinal spell-out of digit strings.
///
/// Outputs are lowercase words separated by single spaces.
pub trait Numeral: Send + Sync {
    /// Spell a 1-3 digit numeral as a cardinal ("023" -> "twenty three").
    ///
    /// Leading zeros are tolerated; an all-zero numeral has no cardinal form.
    fn cardinal(&self, digits: &str) -> Option<String>;

    /// Spell a numeral digit by digit ("00" -> "zero zero").
    fn digits(&self, digits: &str) -> Option<String>;

    /// Turn a cardinal phrase into its ordinal ("twenty one" -> "twenty first").
    fn ordinal(&self, cardinal: &str) -> Option<String>;
}

/// Ordinals that do not follow the "-th" / "-ieth" rule.
const IRREGULAR_ORDINALS: &[(&str, &str)] = &[
    ("one", "first"),
    ("two", "second"),
    ("three", "third"),
    ("five", "fifth"),
    ("eight", "eighth"),
    ("nine", "ninth"),
    ("twelve", "twelfth"),
];

/// English numerals built from the lexical number tables.
#[derive(Debug, Clone)]
pub struct EnglishNumerals {
    digit: HashMap<char, String>,
    teen: HashMap<String, String>,
    ty: HashMap<char, String>,
    zero: String,
}

impl EnglishNumerals {
    pub fn from_tables(tables: &Tables) -> Self {
        let first_char = |labels: &[(String, String)]| -> HashMap<char, String> {
            labels
                .iter()
                .filter_map(|(surface, spoken)| {
                    let mut chars = surface.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => Some((c, spoken.clone())),
                        _ => None,
                    }
                })
                .collect()
        };
        Self {
            digit: first_char(&tables.digit),
            teen: tables.teen.iter().cloned().collect(),
            ty: first_char(&tables.ty),
            zero: tables
                .zero
                .first()
                .map(|(_, spoken)| spoken.clone())
                .unwrap_or_else(|| "zero".to_string()),
        }
    }

    fn two_digit(&self, tens: char, ones: char) -> Option<String> {
        match (tens, ones) {
            ('0', '0') => None,
            ('0', o) => self.digit.get(&o).cloned(),
            ('1', o) => self.teen.get(&format!("1{o}")).cloned(),
            (t, '0') => self.ty.get(&t).cloned(),
            (t, o) => Some(format!("{} {}", self.ty.get(&t)?, self.digit.get(&o)?)),
        }
    }
}

impl Default for EnglishNumerals {
    fn default() -> Self {
        Self::from_tables(Tables::embedded())
    }
}

impl Numeral for EnglishNumerals {
    fn cardinal(&self, digits: &str) -> Option<String> {
        if digits.is_empty() || digits.len() > 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let padded = format!("{digits:0>3}");
        let mut chars = padded.chars();
        let (hundreds, tens, ones) = (chars.next()?, chars.next()?, chars.next()?);

        let rest = self.two_digit(tens, ones);
        if hundreds == '0' {
            return rest;
        }
        let hundred = format!("{} hundred", self.digit.get(&hundreds)?);
        match rest {
            Some(rest) => Some(format!("{hundred} {rest}")),
            None if tens == '0' && ones == '0' => Some(hundred),
            None => None,
        }
    }

    fn digits(&self, digits: &str) -> Option<String> {
        if digits.is_empty() {
            return None;
        }
        let words: Option<Vec<&str>> = digits
            .chars()
            .map(|c| match c {
                '0' => Some(self.zero.as_str()),
                c => self.digit.get(&c).map(String::as_str),
            })
            .collect();
        Some(words?.join(" "))
    }

    fn ordinal(&self, cardinal: &str) -> Option<String> {
        let cardinal = cardinal.trim();
        let (head, last) = match cardinal.rsplit_once(' ') {
            Some((head, last)) => (Some(head), last),
            None => (None, cardinal),
        };
        if last.is_empty() || !last.chars().all(|c| c.is_ascii_lowercase()) {
            return None;
        }

        let ordinal = IRREGULAR_ORDINALS
            .iter()
            .find(|(word, _)| *word == last)
            .map(|(_, ordinal)| (*ordinal).to_string())
            .unwrap_or_else(|| match last.strip_suffix('y') {
                Some(stem) => format!("{stem}ieth"),
                None => format!("{last}th"),
            });

        Some(match head {
            Some(head) => format!("{head} {ordinal}"),
            None => ordinal,
        })
    }
}
