//! Two-digit numerals as spoken in years.

use crate::graph::{insert_space, Graph};
use crate::grammar::Lexicon;
use crate::types::OutputMode;

/// Two digits to their grouped spoken form.
///
/// - "13" -> "thirteen"
/// - "20" -> "twenty"
/// - "84" -> "eighty four"
/// - "05" -> "oh five" (multi-output also offers "zero five")
pub fn ties(lex: &Lexicon, mode: OutputMode) -> Graph {
    let grouped = Graph::union([
        lex.teen.clone(),
        lex.ty.clone().then(Graph::delete("0")),
        lex.ty.clone().then(insert_space()).then(lex.digit.clone()),
    ]);

    let leading_zero = match mode {
        OutputMode::Single => Graph::cross("0", "oh"),
        OutputMode::Multi => Graph::cross("0", "oh").or(Graph::cross("0", "zero")),
    };

    grouped.or(leading_zero.then(insert_space()).then(lex.digit.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::test_support::lexicon;

    #[test]
    fn test_grouped_forms() {
        let g = ties(&lexicon(), OutputMode::Single);
        assert_eq!(g.transduce("13"), vec!["thirteen"]);
        assert_eq!(g.transduce("20"), vec!["twenty"]);
        assert_eq!(g.transduce("84"), vec!["eighty four"]);
        assert_eq!(g.transduce("10"), vec!["ten"]);
    }

    #[test]
    fn test_leading_zero_single() {
        let g = ties(&lexicon(), OutputMode::Single);
        assert_eq!(g.transduce("05"), vec!["oh five"]);
    }

    #[test]
    fn test_leading_zero_multi_keeps_both() {
        let g = ties(&lexicon(), OutputMode::Multi);
        assert_eq!(g.transduce("05"), vec!["oh five", "zero five"]);
    }

    #[test]
    fn test_no_match() {
        let g = ties(&lexicon(), OutputMode::Multi);
        assert!(g.transduce("00").is_empty());
        assert!(g.transduce("5").is_empty());
        assert!(g.transduce("123").is_empty());
    }
}
