//! Translation of data rows into typed datapoints
//!
//! A data row either translates completely or not at all: the first
//! parse failure aborts the whole row, so a submission never carries a
//! partial view of one statistics sample.

use super::schema::{ColumnRole, ColumnSchema};
use crate::app::models::{DataPoint, Dimension};
use crate::constants::header;
use crate::{Error, Result};

/// Outcome of translating one data line
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    /// Row produced datapoints, one per metric column, in column order
    Points(Vec<DataPoint>),

    /// Row is a stray copy of the header line (the timestamp column
    /// holds the literal timestamp token); discarded without error
    RepeatedHeader,
}

/// Translate the split fields of one data row against a schema
///
/// The row width must match the schema exactly. The timestamp column
/// is parsed as integer epoch milliseconds and every metric column as
/// `f64`; the configured dimensions are attached uniformly to every
/// emitted datapoint.
pub fn translate_row(
    schema: &ColumnSchema,
    fields: &[&str],
    dimensions: &[Dimension],
) -> Result<RowOutcome> {
    if fields.len() != schema.len() {
        return Err(Error::schema_mismatch(schema.len(), fields.len()));
    }

    // A server restart reprints the header; its timestamp column is
    // the one token a data row can never contain.
    let timestamp_field = fields[schema.timestamp_index()];
    if timestamp_field == header::TIMESTAMP {
        return Ok(RowOutcome::RepeatedHeader);
    }

    let epoch_millis: i64 = timestamp_field
        .trim()
        .parse()
        .map_err(|_| Error::timestamp_parse(timestamp_field))?;

    let mut points = Vec::with_capacity(schema.metric_count());
    for (role, field) in schema.columns().iter().zip(fields) {
        if let ColumnRole::Metric { name, unit } = role {
            let value: f64 = field
                .trim()
                .parse()
                .map_err(|_| Error::value_parse(name.clone(), *field))?;

            points.push(DataPoint::from_epoch_millis(
                name.clone(),
                *unit,
                value,
                epoch_millis,
                dimensions.to_vec(),
            )?);
        }
    }

    Ok(RowOutcome::Points(points))
}
