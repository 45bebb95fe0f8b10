//! Schema derivation and row translation benchmarks

use metric_relay::app::services::monitor_parser::{
    ColumnSchema, is_header_line, translate_row,
};
use metric_relay::Dimension;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

/// A full monitor header as the statistics logger prints it: 40
/// columns, 29 of which are metric columns.
const MONITOR_HEADER: &str = "total threads,total heap,free heap,sessions,max sessions,\
sessions added,sessions closed,connections,max connections,connections added,\
connections closed,separator,pool threads,active threads,waiting threads,queued tasks,\
pool queue wait,nio write queue,nio write queue wait,nio write selectors,\
nio total selectors,separator,subscribed items,client subscribed items,\
inbound throughput (updates/s),prefiltered throughput (updates/s),\
outbound throughput (updates/s),outbound throughput (kbit/s),\
max outbound throughput (kbit/s),lost updates,total lost updates,total bytes sent,\
separator,client messages throughput (msgs/s),client messages throughput (kbit/s),\
max client messages throughput (kbit/s),total messages handled,extra sleep time,\
extra notify time,time";

const MONITOR_COLUMNS: usize = 40;

fn monitor_row(epoch_millis: i64) -> String {
    (0..MONITOR_COLUMNS)
        .map(|index| {
            if index == MONITOR_COLUMNS - 1 {
                epoch_millis.to_string()
            } else {
                format!("{}.5", index + 1)
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn benchmark_schema_derivation(c: &mut Criterion) {
    let mut group = c.benchmark_group("schema_derivation");
    group.throughput(Throughput::Elements(MONITOR_COLUMNS as u64));

    group.bench_function("monitor_header_40_columns", |b| {
        b.iter(|| {
            let schema = ColumnSchema::from_header_line(black_box(MONITOR_HEADER)).unwrap();
            black_box(schema)
        });
    });

    group.bench_function("narrow_header_3_columns", |b| {
        b.iter(|| {
            let schema =
                ColumnSchema::from_header_line(black_box("Threads,HeapTotal,time")).unwrap();
            black_box(schema)
        });
    });

    group.finish();
}

fn benchmark_row_translation(c: &mut Criterion) {
    let schema = ColumnSchema::from_header_line(MONITOR_HEADER).unwrap();
    let row = monitor_row(1_700_000_000_000);
    let dimensions = vec![Dimension::new("hostname", "bench-host").unwrap()];

    let mut group = c.benchmark_group("row_translation");
    group.throughput(Throughput::Elements(schema.metric_count() as u64));

    group.bench_function("monitor_row_29_metrics", |b| {
        b.iter(|| {
            let fields: Vec<&str> = black_box(row.as_str()).split(',').collect();
            let outcome = translate_row(&schema, &fields, &dimensions).unwrap();
            black_box(outcome)
        });
    });

    group.finish();
}

fn benchmark_header_detection(c: &mut Criterion) {
    let row = monitor_row(1_700_000_000_000);
    let row_fields: Vec<&str> = row.split(',').collect();
    let header_fields: Vec<&str> = MONITOR_HEADER.split(',').collect();

    let mut group = c.benchmark_group("header_detection");

    // Data rows are the common case and force a full scan
    group.bench_function("data_row", |b| {
        b.iter(|| black_box(is_header_line(black_box(&row_fields))));
    });

    group.bench_function("header_line", |b| {
        b.iter(|| black_box(is_header_line(black_box(&header_fields))));
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_schema_derivation,
    benchmark_row_translation,
    benchmark_header_detection,
);

criterion_main!(benches);
