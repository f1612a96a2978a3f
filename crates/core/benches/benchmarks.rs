//! Benchmarks for datespeak-core.
//!
//! Run with: `cargo bench -p datespeak-core`
//!
//! Results are saved to `target/criterion/` with HTML reports.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use datespeak_core::{DateNormalizer, DateRecord, OutputMode};

/// Benchmark inputs, one per surface family.
const INPUTS: &[(&str, &str)] = &[
    ("named_mdy", "jan. 5, 2012"),
    ("named_dmy", "5 january 2012"),
    ("numeric_mdy", "01/05/2012"),
    ("numeric_dmy", "13.05.12"),
    ("iso", "2012-01-05"),
    ("year", "1984"),
    ("decade", "1920s"),
    ("era", "123 A.D."),
    ("financial", "1H23"),
    ("not_a_date", "hello world"),
];

/// Benchmark the full tag + verbalize pipeline in both modes.
fn bench_normalize(c: &mut Criterion) {
    for mode in [OutputMode::Single, OutputMode::Multi] {
        let normalizer = DateNormalizer::with_mode(mode);
        let mut group = c.benchmark_group(format!("normalize_{mode}"));

        for (name, input) in INPUTS {
            group.throughput(Throughput::Elements(1));
            group.bench_with_input(BenchmarkId::new("input", name), input, |b, input| {
                b.iter(|| normalizer.normalize(black_box(input)));
            });
        }

        group.finish();
    }
}

/// Benchmark just the tagging phase.
fn bench_tag(c: &mut Criterion) {
    let normalizer = DateNormalizer::new();

    let mut group = c.benchmark_group("tag");

    for (name, input) in INPUTS {
        group.bench_with_input(BenchmarkId::new("input", name), input, |b, input| {
            b.iter(|| normalizer.tag(black_box(input)));
        });
    }

    group.finish();
}

/// Benchmark verbalizing an already tagged record.
fn bench_verbalize(c: &mut Criterion) {
    let normalizer = DateNormalizer::new();
    let record: DateRecord =
        match r#"date { month: "january" day: "five" year: ", twenty twelve" }"#.parse() {
            Ok(record) => record,
            Err(e) => panic!("benchmark record must parse: {e}"),
        };

    c.bench_function("verbalize", |b| {
        b.iter(|| normalizer.verbalize(black_box(&record)));
    });
}

/// Benchmark normalizer creation, which compiles every grammar and lattice.
fn bench_initialization(c: &mut Criterion) {
    c.bench_function("DateNormalizer::new", |b| {
        b.iter(DateNormalizer::new);
    });
    c.bench_function("DateNormalizer::with_mode(multi)", |b| {
        b.iter(|| DateNormalizer::with_mode(OutputMode::Multi));
    });
}

criterion_group!(
    benches,
    bench_normalize,
    bench_tag,
    bench_verbalize,
    bench_initialization,
);

criterion_main!(benches);
