//! Golden corpus tests for spoken date normalization.
//!
//! Each case pairs a written date with how it must be spoken. Cases are
//! grouped by surface family so a regression in one grammar shows up as a
//! single failing category with every broken input listed.

use datespeak_core::{DateNormalizer, OutputMode};

/// A golden test case: input string and an expected spoken form.
struct GoldenCase {
    input: &'static str,
    spoken: &'static str,
    description: &'static str,
    /// If true, `spoken` must be THE single-output rendering.
    /// If false, it just needs to be among the multi-output renderings.
    must_be_top: bool,
}

impl GoldenCase {
    const fn top(input: &'static str, spoken: &'static str, desc: &'static str) -> Self {
        Self {
            input,
            spoken,
            description: desc,
            must_be_top: true,
        }
    }

    const fn present(input: &'static str, spoken: &'static str, desc: &'static str) -> Self {
        Self {
            input,
            spoken,
            description: desc,
            must_be_top: false,
        }
    }
}

// =============================================================================
// Golden Corpus: Month Day Year (named months)
// =============================================================================

const NAMED_MDY_CASES: &[GoldenCase] = &[
    GoldenCase::top("jan. 5, 2012", "january fifth twenty twelve", "abbreviation with comma"),
    GoldenCase::top("jan. 5", "january fifth", "no year"),
    GoldenCase::top("January 5", "january fifth", "capitalized name"),
    GoldenCase::top("JANUARY 5, 2012", "january fifth twenty twelve", "upper-case name"),
    GoldenCase::top("Sept. 21st", "september twenty first", "ordinal suffix"),
    GoldenCase::top("dec 31 1999", "december thirty first nineteen ninety nine", "no comma"),
    GoldenCase::top("may 2012", "may twenty twelve", "month and year"),
    GoldenCase::top("jan-5-2012", "january fifth twenty twelve", "dashed"),
    GoldenCase::present("jan. 5, 2012", "january five twenty twelve", "cardinal day"),
    GoldenCase::present("jan. 5, 2012", "the fifth of january twenty twelve", "reordered"),
];

// =============================================================================
// Golden Corpus: Day Month Year (named months)
// =============================================================================

const NAMED_DMY_CASES: &[GoldenCase] = &[
    GoldenCase::top("5 january 2012", "the fifth of january twenty twelve", "full"),
    GoldenCase::top("the 3rd march", "the third of march", "article and suffix"),
    GoldenCase::top("21 Feb", "the twenty first of february", "abbreviation"),
];

// =============================================================================
// Golden Corpus: Numeric dates
// =============================================================================

const NUMERIC_CASES: &[GoldenCase] = &[
    GoldenCase::top("01/05/2012", "january fifth twenty twelve", "mm/dd/yyyy"),
    GoldenCase::top("1/5/12", "january fifth twelve", "m/d/yy"),
    GoldenCase::top("12.25.2020", "december twenty fifth twenty twenty", "dotted"),
    GoldenCase::top("12-05-07", "december fifth oh seven", "two-digit year with zero"),
    GoldenCase::top("13.05.12", "the thirteenth of may twelve", "day cannot be a month"),
    GoldenCase::top("25/12/2019", "the twenty fifth of december twenty nineteen", "dd/mm/yyyy"),
    GoldenCase::top("2012-01-05", "january fifth twenty twelve", "iso year first"),
    GoldenCase::top("2019.12.25", "december twenty fifth twenty nineteen", "dotted year first"),
    GoldenCase::present("2012-01-05", "the fifth of january twenty twelve", "year first to dmy"),
    GoldenCase::present("05/06", "may sixth", "month/day"),
    GoldenCase::present("05/06", "may six", "month/day cardinal"),
    GoldenCase::present("05/06", "the sixth of may", "month/day reordered"),
];

// =============================================================================
// Golden Corpus: Years
// =============================================================================

const YEAR_CASES: &[GoldenCase] = &[
    GoldenCase::top("2012", "twenty twelve", "paired"),
    GoldenCase::top("1984", "nineteen eighty four", "paired"),
    GoldenCase::top("1905", "nineteen oh five", "oh"),
    GoldenCase::top("1900", "nineteen hundred", "round hundred"),
    GoldenCase::top("1000", "one thousand", "round thousand"),
    GoldenCase::top("2000", "two thousand", "thousand collapse"),
    GoldenCase::top("2005", "two thousand five", "thousand collapse"),
    GoldenCase::top("2010", "twenty ten", "no collapse"),
    GoldenCase::top("1920s", "nineteen twenties", "decade plural"),
    GoldenCase::top("1920 s", "nineteen twenties", "spaced decade plural"),
    GoldenCase::top("1900s", "nineteen hundreds", "century plural"),
    GoldenCase::top("2000s", "two thousands", "thousand plural"),
    GoldenCase::top("'70s", "seventies", "apostrophe decade"),
    GoldenCase::top("90s", "nineties", "bare decade"),
    GoldenCase::top("123 A.D.", "one twenty three A D", "three digits with era"),
    GoldenCase::top("4200 B.C.", "forty two hundred B C", "four digits with era"),
    GoldenCase::top("1066 AD", "ten sixty six A D", "era without periods"),
    GoldenCase::present("2005", "twenty oh five", "paired reading"),
    GoldenCase::present("2005", "twenty zero five", "zero reading"),
    GoldenCase::present("2000s", "twenty hundreds", "hundreds reading"),
    GoldenCase::present("123 A.D.", "one twenty three A D.", "era keeps period"),
];

// =============================================================================
// Golden Corpus: Financial periods
// =============================================================================

const FINANCIAL_CASES: &[GoldenCase] = &[
    GoldenCase::top("1H23", "the first half of twenty three", "half"),
    GoldenCase::top("2H22", "the second half of twenty two", "half"),
    GoldenCase::top("3Q22", "the third quarter of twenty two", "quarter"),
    GoldenCase::top("4Q05", "the fourth quarter of oh five", "quarter with zero"),
];

/// Inputs no family accepts.
const REJECTED: &[&str] = &[
    "",
    "hello",
    "5",
    "99",
    "123",
    "31st",
    "jan. 00, 2012",
    "jan. 32, 2012",
    "jan. 39",
    "32 january 2012",
    "00/05/2012",
    "01/32/2012",
    "39/01/2012",
    "2012-13-01",
    "2012-01-00",
    "05/06-2012",
    "3H23",
    "5Q23",
];

// =============================================================================
// Test Runner
// =============================================================================

fn run_golden_tests(cases: &[GoldenCase], category: &str) {
    let single = DateNormalizer::with_mode(OutputMode::Single);
    let multi = DateNormalizer::with_mode(OutputMode::Multi);
    let mut failures = Vec::new();

    for case in cases {
        if case.must_be_top {
            let spoken = single.normalize(case.input);
            if spoken != [case.spoken] {
                failures.push(format!(
                    "[{}] '{}' ({}): expected exactly [{:?}], got {:?}",
                    category, case.input, case.description, case.spoken, spoken
                ));
            }
        }

        let spoken = multi.normalize(case.input);
        if !spoken.iter().any(|s| s == case.spoken) {
            failures.push(format!(
                "[{}] '{}' ({}): {:?} not among multi-output forms {:?}",
                category, case.input, case.description, case.spoken, spoken
            ));
        }
    }

    if !failures.is_empty() {
        panic!(
            "\n{} golden corpus failures:\n\n{}\n",
            failures.len(),
            failures.join("\n\n")
        );
    }
}

// =============================================================================
// Individual Test Functions
// =============================================================================

#[test]
fn test_golden_named_mdy() {
    run_golden_tests(NAMED_MDY_CASES, "Named MDY");
}

#[test]
fn test_golden_named_dmy() {
    run_golden_tests(NAMED_DMY_CASES, "Named DMY");
}

#[test]
fn test_golden_numeric() {
    run_golden_tests(NUMERIC_CASES, "Numeric");
}

#[test]
fn test_golden_years() {
    run_golden_tests(YEAR_CASES, "Years");
}

#[test]
fn test_golden_financial() {
    run_golden_tests(FINANCIAL_CASES, "Financial");
}

#[test]
fn test_golden_rejected() {
    let failures: Vec<String> = [OutputMode::Single, OutputMode::Multi]
        .into_iter()
        .flat_map(|mode| {
            let normalizer = DateNormalizer::with_mode(mode);
            REJECTED.iter().filter_map(move |input| {
                let spoken = normalizer.normalize(input);
                (!spoken.is_empty()).then(|| format!("[{mode}] '{input}' -> {spoken:?}"))
            })
        })
        .collect();
    assert!(failures.is_empty(), "accepted non-dates:\n{}", failures.join("\n"));
}

// =============================================================================
// Summary Test (runs all and reports)
// =============================================================================

#[test]
fn test_golden_corpus_summary() {
    let all_cases: &[(&str, &[GoldenCase])] = &[
        ("Named MDY", NAMED_MDY_CASES),
        ("Named DMY", NAMED_DMY_CASES),
        ("Numeric", NUMERIC_CASES),
        ("Years", YEAR_CASES),
        ("Financial", FINANCIAL_CASES),
    ];

    let total: usize = all_cases.iter().map(|(_, cases)| cases.len()).sum();
    eprintln!(
        "\nGolden corpus: {} test cases across {} categories, {} rejected inputs",
        total,
        all_cases.len(),
        REJECTED.len()
    );
}
