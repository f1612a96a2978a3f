//! Year grammars.
//!
//! Four-digit years are read in pairs ("1984" -> "nineteen eighty four") with
//! exceptions for round hundreds, decade plurals and the thousand collapse
//! ("2005" -> "two thousand five"). The general year grammar restricts that to
//! years starting with 1 or 2 and adds apostrophe decades and era suffixes.

use crate::graph::{delete_space, digit, insert_space, Graph};
use crate::grammar::{decade, pluralize, Lexicon};
use crate::types::OutputMode;

/// Any four-digit numeral, with an optional trailing plural "s".
///
/// In single-output mode the thousand collapse wins whenever it applies.
/// Multi-output mode offers it first and the paired readings after it.
pub fn four_digit(lex: &Lexicon, mode: OutputMode) -> Graph {
    let ties = decade::ties(lex, mode);
    let teen_or_ties = lex.teen.clone().or(ties.clone());
    let hundred = teen_or_ties
        .then(insert_space())
        .then(Graph::cross("00", "hundred"));

    // 1920s -> nineteen twenties, 1910s -> nineteen tens, 1900s -> nineteen hundreds
    let tens_word = lex.ty.clone().or(Graph::cross("1", "ten"));
    let plural = ties
        .clone()
        .then(insert_space())
        .then(tens_word)
        .then(Graph::delete("0s"))
        .or(hundred.clone().then(Graph::delete("s")))
        .rewrite(|words| Some(pluralize(words)));

    let paired = ties
        .clone()
        .then(insert_space())
        .then(ties)
        .or(hundred)
        .or(plural);

    let thousand = lex
        .digit
        .clone()
        .then(insert_space())
        .then(Graph::cross("00", "thousand"))
        .then(Graph::delete("0").or(insert_space().then(lex.digit.clone())))
        .or(lex
            .digit
            .clone()
            .then(insert_space())
            .then(Graph::cross("000", "thousand"))
            .then(Graph::delete(" ").optional())
            .then(Graph::accep("s")));

    match mode {
        OutputMode::Single => thousand.prefer_over(paired),
        OutputMode::Multi => thousand.or(paired),
    }
}

/// "'70s" / "70s" -> "seventies".
pub fn decade_plural(lex: &Lexicon) -> Graph {
    Graph::delete("'").optional().then(
        lex.ty
            .clone()
            .then(Graph::delete("0s"))
            .rewrite(|words| Some(pluralize(words))),
    )
}

/// "123" -> "one twenty three".
pub fn three_digit(lex: &Lexicon) -> Graph {
    digit()
        .compose(lex.cardinal.clone())
        .then(insert_space())
        .then(digit().repeat(2).compose(lex.cardinal.clone()))
}

/// A four- or three-digit year followed by an era marker: "123 A.D.", "4200 B.C.".
pub fn with_era_suffix(lex: &Lexicon) -> Graph {
    four_digit(lex, OutputMode::Single)
        .or(three_digit(lex))
        .then(delete_space())
        .then(insert_space())
        .then(lex.year_suffix.clone())
}

/// Every form a standalone year may take.
pub fn year(lex: &Lexicon, mode: OutputMode) -> Graph {
    let one_or_two = Graph::accep("1").or(Graph::accep("2"));
    let plural_s = Graph::cross(" s", "s").or(Graph::accep("s"));
    let restricted = one_or_two
        .then(digit().repeat(3))
        .then(plural_s.optional())
        .compose(four_digit(lex, mode));

    restricted.or(decade_plural(lex)).or(with_era_suffix(lex))
}

/// A bare two-digit year: grouped when possible, digit by digit otherwise.
pub fn two_digit(lex: &Lexicon, mode: OutputMode) -> Graph {
    digit()
        .repeat(2)
        .compose(decade::ties(lex, mode).prefer_over(lex.single_digits.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::test_support::lexicon;

    fn single(input: &str) -> Vec<String> {
        year(&lexicon(), OutputMode::Single).transduce(input)
    }

    fn multi(input: &str) -> Vec<String> {
        year(&lexicon(), OutputMode::Multi).transduce(input)
    }

    #[test]
    fn test_paired_years() {
        assert_eq!(single("1984"), vec!["nineteen eighty four"]);
        assert_eq!(single("2012"), vec!["twenty twelve"]);
        assert_eq!(single("1905"), vec!["nineteen oh five"]);
        assert_eq!(single("1900"), vec!["nineteen hundred"]);
    }

    #[test]
    fn test_decade_plurals() {
        assert_eq!(single("1920s"), vec!["nineteen twenties"]);
        assert_eq!(single("1920 s"), vec!["nineteen twenties"]);
        assert_eq!(single("1910s"), vec!["nineteen tens"]);
        assert_eq!(single("1900s"), vec!["nineteen hundreds"]);
        assert_eq!(single("'70s"), vec!["seventies"]);
        assert_eq!(single("70s"), vec!["seventies"]);
    }

    #[test]
    fn test_thousand_collapse_wins_in_single_mode() {
        assert_eq!(single("2000"), vec!["two thousand"]);
        assert_eq!(single("2005"), vec!["two thousand five"]);
        assert_eq!(single("2000s"), vec!["two thousands"]);
        assert_eq!(single("2010"), vec!["twenty ten"]);
    }

    #[test]
    fn test_multi_mode_offers_both_readings() {
        assert_eq!(
            multi("2005"),
            vec!["two thousand five", "twenty oh five", "twenty zero five"]
        );
        assert_eq!(multi("2000"), vec!["two thousand", "twenty hundred"]);

        let outputs = multi("2000s");
        assert!(outputs.contains(&"two thousands".to_string()));
        assert!(outputs.contains(&"twenty hundreds".to_string()));
    }

    #[test]
    fn test_four_digit_unrestricted() {
        let g = four_digit(&lexicon(), OutputMode::Single);
        assert_eq!(g.transduce("3900"), vec!["thirty nine hundred"]);
        assert!(single("3900").is_empty());
    }

    #[test]
    fn test_era_suffix() {
        assert_eq!(single("123 A.D.")[0], "one twenty three A D");
        assert_eq!(single("4200 B.C.")[0], "forty two hundred B C");
        assert_eq!(single("4200B.C.")[0], "forty two hundred B C");
        assert_eq!(single("1066 AD"), vec!["ten sixty six A D"]);
        assert!(single("123 A.D.").contains(&"one twenty three A D.".to_string()));
    }

    #[test]
    fn test_rejected_years() {
        assert!(single("123").is_empty());
        assert!(single("0999").is_empty());
        assert!(single("12345").is_empty());
        assert!(single("80").is_empty());
    }

    #[test]
    fn test_two_digit_year() {
        let lex = lexicon();
        let g = two_digit(&lex, OutputMode::Single);
        assert_eq!(g.transduce("23"), vec!["twenty three"]);
        assert_eq!(g.transduce("05"), vec!["oh five"]);
        assert_eq!(g.transduce("00"), vec!["zero zero"]);
        let g = two_digit(&lex, OutputMode::Multi);
        assert_eq!(g.transduce("05"), vec!["oh five", "zero five"]);
    }
}
