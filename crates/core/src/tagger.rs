//! Date tagger: raw date text to tagged records.
//!
//! The grammar is assembled once from the lexical tables and the sub-grammars
//! in [`crate::grammar`]. It emits record bodies such as
//! `month: "january" day: "five" year: ", twenty twelve"`, which are wrapped
//! in the `date { .. }` envelope and parsed into [`DateRecord`]s.
//!
//! Recognized families:
//!
//! | Family | Example |
//! |---|---|
//! | month day year | `jan. 5, 2012`, `January 5`, `jan-5-2012`, `01/05/2012` |
//! | day month year | `5 january 2012`, `13.05.12` |
//! | year month day | `2012-01-05` (reordered, never emitted as-is) |
//! | year | `2012`, `1920s`, `'70s`, `123 A.D.` |
//! | financial period | `1H23`, `3Q22` |
//! | month/day | `05/06` (multi-output only) |

use std::sync::Arc;

use crate::grammar::{period, year, Lexicon};
use crate::graph::{any_char, delete_extra_space, digit, insert_space, Graph};
use crate::numeral::Numeral;
use crate::reorder::{ReorderKind, ReorderLattice};
use crate::tables::Tables;
use crate::types::{DateRecord, OutputMode, RECORD_NAME};

const PRESERVE_ORDER: &str = " preserve_order: \"true\"";
const NUMERIC_SEPARATORS: [&str; 3] = ["-", "/", "."];

/// Wrap `inner` as `name: "<inner output>"`.
fn field(name: &str, inner: Graph) -> Graph {
    Graph::insert(&format!("{name}: \""))
        .then(inner)
        .then(Graph::insert("\""))
}

/// Recognizes date spans and emits tagged records.
#[derive(Debug, Clone)]
pub struct DateTagger {
    graph: Graph,
    mode: OutputMode,
}

/// Intermediate grammars shared by several families.
struct Parts {
    month: Graph,
    month_number: Graph,
    month_number_input: Graph,
    day: Graph,
    year: Graph,
    /// ` year: ".."` appended after a month or day, keeping a leading comma.
    trailing_year: Graph,
    two_digit_year: Graph,
}

impl Parts {
    fn new(tables: &Tables, lex: &Lexicon, mode: OutputMode) -> Self {
        let names = Graph::table(tables.month_names_with_case());
        let abbrs = Graph::table(tables.month_abbrs_with_case()).then(Graph::delete(".").optional());
        let month = field("month", names.or(abbrs));

        let month_number_table = Graph::table(tables.month_number.iter().cloned());
        let month_number = field("month", month_number_table.clone());

        let suffix = Graph::union(
            tables
                .day_suffixes_with_case()
                .iter()
                .map(|s| Graph::delete(s)),
        );
        let one_or_two = Graph::accep("1").or(Graph::accep("2"));
        let thirties = Graph::accep("3").then(Graph::accep("0").or(Graph::accep("1")));
        let day_digits = Graph::union([one_or_two.then(digit()), digit(), thirties])
            .then(suffix.optional());
        let day = field(
            "day",
            Graph::delete("the ")
                .optional()
                .then(day_digits.compose(lex.cardinal.clone())),
        );

        let year_words = year::year(lex, mode);
        let trailing_year = Graph::insert(" year: \"")
            .then(Graph::delete(" "))
            .then(year_words.clone())
            .then(Graph::insert("\""))
            .or(Graph::insert(" year: \"")
                .then(Graph::accep(","))
                .then(Graph::accep(" ").optional())
                .then(year_words.clone())
                .then(Graph::insert("\"")));

        Self {
            month,
            month_number,
            month_number_input: month_number_table,
            day,
            year: field("year", year_words),
            trailing_year,
            two_digit_year: field("year", year::two_digit(lex, mode)),
        }
    }

    fn any_year(&self) -> Graph {
        self.year.clone().or(self.two_digit_year.clone())
    }

    /// month [day] [year], with named or numeric months.
    fn mdy(&self) -> Graph {
        let dex = delete_extra_space();
        let mut graph = self.month.clone().then(Graph::union([
            dex.clone().then(self.day.clone()),
            Graph::accep(" ").then(self.day.clone()),
            self.trailing_year.clone(),
            dex.then(self.day.clone()).then(self.trailing_year.clone()),
        ]));

        // jan-5, jan-5-2012
        let dashed_year = Graph::cross("-", " ")
            .then(any_char().star())
            .compose(self.trailing_year.clone());
        graph = graph.or(self
            .month
            .clone()
            .then(Graph::cross("-", " "))
            .then(self.day.clone())
            .then(dashed_year.optional()));

        for sep in NUMERIC_SEPARATORS {
            graph = graph.or(Graph::concat([
                self.month_number.clone(),
                Graph::delete(sep),
                insert_space(),
                Graph::delete("0").optional(),
                self.day.clone(),
                Graph::delete(sep),
                insert_space(),
                self.any_year(),
            ]));
        }
        graph
    }

    /// day month [year], and numeric day.month.year with a non-month day.
    fn dmy(&self) -> Graph {
        let mut graph = Graph::concat([
            self.day.clone(),
            delete_extra_space(),
            self.month.clone(),
            self.trailing_year.clone().optional(),
        ]);

        let day_ex_month = digit()
            .repeat(2)
            .minus(self.month_number_input.clone())
            .compose(self.day.clone());
        for sep in NUMERIC_SEPARATORS {
            graph = graph.or(Graph::concat([
                day_ex_month.clone(),
                Graph::delete(sep),
                insert_space(),
                self.month_number.clone(),
                Graph::delete(sep),
                insert_space(),
                self.any_year(),
            ]));
        }
        graph
    }

    /// year-month-day; only reachable through the reorder lattices.
    fn ymd(&self) -> Graph {
        Graph::union(NUMERIC_SEPARATORS.iter().map(|sep| {
            Graph::concat([
                self.any_year(),
                Graph::delete(sep),
                insert_space(),
                self.month_number.clone(),
                Graph::delete(sep),
                insert_space(),
                Graph::delete("0").optional(),
                self.day.clone(),
            ])
        }))
    }

    /// 05/06 -> month and day without a year.
    fn month_sep_day(&self) -> Graph {
        Graph::concat([
            self.month_number.clone(),
            Graph::delete("-").or(Graph::delete("/")),
            insert_space(),
            Graph::delete("0").optional(),
            self.day.clone(),
        ])
    }

    /// 1H23 -> text: "first half" year: "twenty three"
    fn financial(&self) -> Graph {
        field("text", period::financial_period())
            .then(insert_space())
            .then(self.two_digit_year.clone())
    }
}

impl DateTagger {
    pub fn new(tables: &Tables, numeral: Arc<dyn Numeral>, mode: OutputMode) -> Self {
        let lex = Lexicon::new(tables, numeral);
        let parts = Parts::new(tables, &lex, mode);
        let months = tables.month_words();
        let days = tables.day_words();
        let lattice = |kind| Arc::new(ReorderLattice::build(kind, &months, &days));

        let mdy = parts.mdy();
        let ordered = mdy.clone().or(parts.dmy());
        let ymd = parts.ymd();
        let ymd_to_mdy = lattice(ReorderKind::YmdToMdy).over(ymd.clone());

        let graph = match mode {
            OutputMode::Single => Graph::union([
                ordered.then(Graph::insert(PRESERVE_ORDER)),
                parts.year.clone(),
                parts.financial(),
                ymd_to_mdy,
            ]),
            OutputMode::Multi => {
                let month_day = parts.month_sep_day();
                Graph::union([
                    ordered.then(Graph::insert(PRESERVE_ORDER).optional()),
                    month_day.clone(),
                    parts.year.clone(),
                    parts.financial(),
                    ymd_to_mdy,
                    lattice(ReorderKind::MdyToDmy).over(mdy),
                    lattice(ReorderKind::MdToDm).over(month_day),
                    lattice(ReorderKind::YmdToDmy).over(ymd),
                ])
            }
        };

        tracing::debug!(
            "Built {} date tagger over {} months and {} days",
            mode,
            months.len(),
            days.len()
        );
        Self { graph, mode }
    }

    #[must_use]
    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Tagged record bodies for `input`, without the record envelope.
    pub fn tag_bodies(&self, input: &str) -> Vec<String> {
        let input = input.trim();
        match self.mode {
            OutputMode::Single => self.graph.transduce_first(input).into_iter().collect(),
            OutputMode::Multi => self.graph.transduce(input),
        }
    }

    /// Tag one candidate date span.
    ///
    /// Returns no records when the span is not a date. Single-output mode
    /// returns at most one.
    pub fn tag(&self, input: &str) -> Vec<DateRecord> {
        let mut records: Vec<DateRecord> = Vec::new();
        for body in self.tag_bodies(input) {
            match format!("{RECORD_NAME} {{ {body} }}").parse::<DateRecord>() {
                Ok(record) => {
                    if !records.contains(&record) {
                        records.push(record);
                    }
                }
                Err(e) => tracing::warn!("Discarding malformed tag {:?}: {}", body, e),
            }
        }
        tracing::trace!("Tagged {:?} into {} record(s)", input, records.len());
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeral::EnglishNumerals;
    use pretty_assertions::assert_eq;

    fn tagger(mode: OutputMode) -> DateTagger {
        DateTagger::new(
            Tables::embedded(),
            Arc::new(EnglishNumerals::default()),
            mode,
        )
    }

    fn single(input: &str) -> Vec<String> {
        tagger(OutputMode::Single)
            .tag(input)
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    fn multi(input: &str) -> Vec<String> {
        tagger(OutputMode::Multi)
            .tag(input)
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn test_named_month_day_year() {
        assert_eq!(
            single("jan. 5, 2012"),
            vec![
                r#"date { month: "january" day: "five" year: ", twenty twelve" preserve_order: "true" }"#
            ]
        );
        assert_eq!(
            single("jan. 5"),
            vec![r#"date { month: "january" day: "five" preserve_order: "true" }"#]
        );
        assert_eq!(
            single("January 2012"),
            vec![r#"date { month: "january" year: "twenty twelve" preserve_order: "true" }"#]
        );
        assert_eq!(
            single("SEPT 21st"),
            vec![r#"date { month: "september" day: "twenty one" preserve_order: "true" }"#]
        );
    }

    #[test]
    fn test_dashed_month() {
        assert_eq!(
            single("jan-5-2012"),
            vec![
                r#"date { month: "january" day: "five" year: "twenty twelve" preserve_order: "true" }"#
            ]
        );
        assert_eq!(
            single("feb-29"),
            vec![r#"date { month: "february" day: "twenty nine" preserve_order: "true" }"#]
        );
    }

    #[test]
    fn test_day_month_year() {
        assert_eq!(
            single("5 january 2012"),
            vec![
                r#"date { day: "five" month: "january" year: "twenty twelve" preserve_order: "true" }"#
            ]
        );
        assert_eq!(
            single("the 3rd  March"),
            vec![r#"date { day: "three" month: "march" preserve_order: "true" }"#]
        );
    }

    #[test]
    fn test_numeric_families() {
        assert_eq!(
            single("01/05/2012"),
            vec![
                r#"date { month: "january" day: "five" year: "twenty twelve" preserve_order: "true" }"#
            ]
        );
        assert_eq!(
            single("13.05.12"),
            vec![r#"date { day: "thirteen" month: "may" year: "twelve" preserve_order: "true" }"#]
        );
        assert_eq!(
            single("2012-01-05"),
            vec![r#"date { month: "january" day: "five" year: "twenty twelve" }"#]
        );
        assert_eq!(
            single("2012/01/05"),
            vec![r#"date { month: "january" day: "five" year: "twenty twelve" }"#]
        );
    }

    #[test]
    fn test_year_and_financial() {
        assert_eq!(single("2012"), vec![r#"date { year: "twenty twelve" }"#]);
        assert_eq!(single("'70s"), vec![r#"date { year: "seventies" }"#]);
        assert_eq!(
            single("1H23"),
            vec![r#"date { text: "first half" year: "twenty three" }"#]
        );
        assert_eq!(
            single("3Q22"),
            vec![r#"date { text: "third quarter" year: "twenty two" }"#]
        );
    }

    #[test]
    fn test_invalid_days_rejected() {
        for input in [
            "jan. 00, 2012",
            "jan. 32, 2012",
            "jan. 39",
            "00 january",
            "32 january 2012",
            "01/00/2012",
            "01/32/2012",
            "39/01/2012",
            "2012-01-32",
            "2012-01-00",
        ] {
            assert!(single(input).is_empty(), "{input}");
            assert!(multi(input).is_empty(), "{input}");
        }
    }

    #[test]
    fn test_month_valued_day_is_not_dmy() {
        // 05 is a month number, so this is never day 5 of June
        assert!(single("05/06-2012").is_empty());
        assert!(multi("05/06-2012").is_empty());
        for record in multi("05.06.2012") {
            assert!(record.starts_with(r#"date { month: "may""#) || record.starts_with(r#"date { day: "six""#), "{record}");
        }
    }

    #[test]
    fn test_month_day_is_multi_only() {
        assert!(single("05/06").is_empty());
        let records = multi("05/06");
        assert!(records.contains(&r#"date { month: "may" day: "six" }"#.to_string()));
        assert!(records.contains(&r#"date { day: "six" month: "may" }"#.to_string()));
    }

    #[test]
    fn test_multi_reorders() {
        let records = multi("2012-01-05");
        assert!(records.contains(&r#"date { month: "january" day: "five" year: "twenty twelve" }"#.to_string()));
        assert!(records.contains(&r#"date { day: "five" month: "january" year: "twenty twelve" }"#.to_string()));

        let records = multi("jan. 5, 2012");
        assert!(records.contains(
            &r#"date { day: "five" month: "january" year: ", twenty twelve" }"#.to_string()
        ));
        assert!(records.contains(
            &r#"date { month: "january" day: "five" year: ", twenty twelve" }"#.to_string()
        ));
    }

    #[test]
    fn test_single_is_subset_of_multi() {
        for input in ["jan. 5, 2012", "2012-01-05", "13.05.12", "2005", "1H23", "05/06/12"] {
            let single = single(input);
            assert_eq!(single.len(), 1, "{input}");
            assert!(multi(input).contains(&single[0]), "{input}");
        }
    }

    #[test]
    fn test_not_dates() {
        for input in ["", "hello", "5", "13/13/2012", "january fifth"] {
            assert!(single(input).is_empty(), "{input}");
        }
    }
}
