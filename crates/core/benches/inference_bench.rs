//! Benchmarks for column inference and script generation
//!
//! Run with: cargo bench -p sheetsql-core

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use sheetsql_core::inference::{Format, infer_column_type, profile_columns};
use sheetsql_core::sql::{BatchInsertWriter, SchemaBuilder};

/// Generate sample sheet rows for benchmarking
fn generate_rows(count: usize) -> Vec<Vec<String>> {
    (0..count)
        .map(|i| {
            vec![
                i.to_string(),
                format!("User {}", i),
                format!("{}.{:02}", 1000 + i * 7, i % 100),
                format!("2024-{:02}-{:02}", (i % 12) + 1, (i % 28) + 1),
                (i % 2).to_string(),
                format!(r#"{{"seq": {}}}"#, i),
            ]
        })
        .collect()
}

fn header() -> Vec<String> {
    ["id", "name", "balance", "joined", "active", "meta"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Benchmark format matching for various cell patterns
fn bench_format_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("format_matching");

    let test_cases = vec![
        ("date", Format::Date, "2024-01-15"),
        ("datetime", Format::DateTime, "2024-01-15 10:30:00"),
        ("time", Format::Time, "10:30:00"),
        ("json", Format::Json, r#"{"a": 1}"#),
        ("uuid", Format::Uuid, "550e8400-e29b-41d4-a716-446655440000"),
    ];

    for (name, format, value) in test_cases {
        group.bench_with_input(BenchmarkId::new("matches", name), &value, |b, value| {
            b.iter(|| black_box(format.matches(value)));
        });
    }

    group.finish();
}

/// Benchmark single-column inference with varying row counts
fn bench_column_inference(c: &mut Criterion) {
    let mut group = c.benchmark_group("column_inference");

    for count in [100, 1000, 10000].iter() {
        let values: Vec<String> = (0..*count).map(|i| format!("{}.5", i)).collect();
        group.throughput(Throughput::Elements(*count as u64));

        group.bench_with_input(BenchmarkId::new("decimal", count), &values, |b, values| {
            b.iter(|| black_box(infer_column_type(values.iter())));
        });
    }

    group.finish();
}

/// Benchmark profiling a whole sheet and rendering its scripts
fn bench_sheet_scripts(c: &mut Criterion) {
    let mut group = c.benchmark_group("sheet_scripts");
    let header = header();

    for count in [100, 1000, 5000].iter() {
        let rows = generate_rows(*count);
        group.throughput(Throughput::Elements(*count as u64));

        group.bench_with_input(BenchmarkId::new("profile_and_write", count), &rows, |b, rows| {
            b.iter(|| {
                let columns = profile_columns(&header, rows);
                let schema = SchemaBuilder::build("users", &columns);
                let inserts = BatchInsertWriter::default().write("users", &columns, rows);
                black_box((schema, inserts))
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_format_matching,
    bench_column_inference,
    bench_sheet_scripts
);
criterion_main!(benches);
