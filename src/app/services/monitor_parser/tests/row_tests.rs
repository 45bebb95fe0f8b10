//! Tests for data row translation

use super::{MONITOR_HEADER, MONITOR_METRICS, monitor_row, split, test_dimensions};
use crate::Error;
use crate::app::models::Unit;
use crate::app::services::monitor_parser::row::{RowOutcome, translate_row};
use crate::app::services::monitor_parser::schema::ColumnSchema;

fn simple_schema() -> ColumnSchema {
    ColumnSchema::from_header_line("Threads,HeapTotal,time").unwrap()
}

fn points(outcome: RowOutcome) -> Vec<crate::app::models::DataPoint> {
    match outcome {
        RowOutcome::Points(points) => points,
        RowOutcome::RepeatedHeader => panic!("expected datapoints, got a repeated header"),
    }
}

#[test]
fn test_translates_row_in_column_order() {
    let schema = simple_schema();
    let outcome = translate_row(
        &schema,
        &split("12,5120,1700000000000"),
        &test_dimensions(),
    )
    .unwrap();

    let points = points(outcome);
    assert_eq!(points.len(), 2);

    assert_eq!(points[0].metric_name, "Threads");
    assert_eq!(points[0].unit, None);
    assert_eq!(points[0].value, 12.0);

    assert_eq!(points[1].metric_name, "HeapTotal");
    assert_eq!(points[1].unit, Some(Unit::Bytes));
    assert_eq!(points[1].value, 5120.0);
}

#[test]
fn test_timestamp_and_dimensions_are_shared() {
    let schema = simple_schema();
    let points = points(
        translate_row(
            &schema,
            &split("12,5120,1700000000000"),
            &test_dimensions(),
        )
        .unwrap(),
    );

    for point in &points {
        assert_eq!(point.timestamp.timestamp_millis(), 1_700_000_000_000);
        assert_eq!(point.dimensions, test_dimensions());
    }
}

#[test]
fn test_empty_dimension_set() {
    let schema = simple_schema();
    let points = points(translate_row(&schema, &split("1,2,0"), &[]).unwrap());

    assert!(points.iter().all(|p| p.dimensions.is_empty()));
}

#[test]
fn test_width_mismatch_is_rejected() {
    let schema = simple_schema();
    let result = translate_row(&schema, &split("12,5120"), &[]);

    match result {
        Err(Error::SchemaMismatch { expected, found }) => {
            assert_eq!(expected, 3);
            assert_eq!(found, 2);
        }
        other => panic!("expected schema mismatch, got {:?}", other),
    }
}

#[test]
fn test_repeated_header_row_is_discarded_silently() {
    let schema = simple_schema();

    // Exact header copy: width matches and the timestamp column holds
    // the literal token.
    let outcome = translate_row(&schema, &split("Threads,HeapTotal,time"), &[]).unwrap();
    assert_eq!(outcome, RowOutcome::RepeatedHeader);

    // Same marker with otherwise numeric fields.
    let outcome = translate_row(&schema, &split("12,99,time"), &[]).unwrap();
    assert_eq!(outcome, RowOutcome::RepeatedHeader);
}

#[test]
fn test_unparseable_timestamp_aborts_row() {
    let schema = simple_schema();
    let result = translate_row(&schema, &split("12,5120,not-a-time"), &[]);

    assert!(matches!(result, Err(Error::TimestampParse { .. })));
}

#[test]
fn test_fractional_timestamp_is_rejected() {
    let schema = simple_schema();
    let result = translate_row(&schema, &split("12,5120,1700000000000.5"), &[]);

    assert!(matches!(result, Err(Error::TimestampParse { .. })));
}

#[test]
fn test_unparseable_value_aborts_whole_row() {
    let schema = simple_schema();
    let result = translate_row(&schema, &split("twelve,5120,1700000000000"), &[]);

    match result {
        Err(Error::ValueParse { column, value }) => {
            assert_eq!(column, "Threads");
            assert_eq!(value, "twelve");
        }
        other => panic!("expected value parse error, got {:?}", other),
    }
}

#[test]
fn test_non_finite_value_aborts_row() {
    // `NaN` parses as f64 but can never be submitted.
    let schema = simple_schema();
    let result = translate_row(&schema, &split("NaN,5120,1700000000000"), &[]);

    assert!(matches!(result, Err(Error::ValueParse { .. })));
}

#[test]
fn test_values_tolerate_surrounding_whitespace() {
    let schema = simple_schema();
    let points = points(translate_row(&schema, &split(" 12 , 5120 , 1700000000000 "), &[]).unwrap());

    assert_eq!(points[0].value, 12.0);
    assert_eq!(points[1].value, 5120.0);
}

#[test]
fn test_scientific_notation_values() {
    let schema = simple_schema();
    let points = points(translate_row(&schema, &split("1.2e3,0.5,1700000000000"), &[]).unwrap());

    assert_eq!(points[0].value, 1200.0);
    assert_eq!(points[1].value, 0.5);
}

#[test]
fn test_duplicate_metric_names_emit_positionally() {
    let schema =
        ColumnSchema::from_header_line("InboundThroughput,InboundThroughput,time").unwrap();
    let points = points(translate_row(&schema, &split("1,2,1700000000000"), &[]).unwrap());

    assert_eq!(points.len(), 2);
    assert_eq!(points[0].metric_name, "InboundThroughput");
    assert_eq!(points[1].metric_name, "InboundThroughput");
    assert_eq!(points[0].value, 1.0);
    assert_eq!(points[1].value, 2.0);
}

#[test]
fn test_full_monitor_row() {
    let schema = ColumnSchema::from_header(&split(MONITOR_HEADER)).unwrap();
    let row = monitor_row(1_700_000_000_000);
    let points = points(translate_row(&schema, &split(&row), &test_dimensions()).unwrap());

    assert_eq!(points.len(), MONITOR_METRICS);

    // Values arrive in column order; the first metric column is the
    // first header column.
    assert_eq!(points[0].metric_name, "total threads");
    assert_eq!(points[0].value, 1.0);
    assert_eq!(points[1].metric_name, "total heap");
    assert_eq!(points[1].unit, Some(Unit::Bytes));
}

#[test]
fn test_schema_with_only_timestamp_emits_nothing() {
    let schema = ColumnSchema::from_header_line("separator,time").unwrap();
    let points = points(translate_row(&schema, &split("0,1700000000000"), &[]).unwrap());

    assert!(points.is_empty());
}
