//! Line-by-line ingestion state machine
//!
//! Feeds every line of a monitor log through schema derivation, row
//! translation, and batch submission. Row-level failures are logged and
//! counted but never propagate: one bad line must not take down a
//! long-running tail.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::app::services::metric_sink::{BatchSubmitter, MetricsSink};
use crate::app::services::monitor_parser::{
    ColumnSchema, RelayStats, RowOutcome, is_header_line, translate_row,
};
use crate::config::RelayConfig;
use crate::{Error, Result};

/// Ingestion phase of a relay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayState {
    /// No schema yet; data rows are dropped until a header arrives
    AwaitingSchema,

    /// Schema established; data rows translate into datapoints
    Streaming,
}

/// Stateful controller for one monitor log stream
///
/// Owns the current column schema, the submitter, and the running
/// statistics. Lines are classified by width first: a line matching the
/// schema width is always treated as a data row, so a pathological row
/// that happens to contain a header-like token cannot corrupt the
/// schema. Only a line whose width differs from the schema is
/// considered as a replacement header.
#[derive(Debug)]
pub struct MetricRelay {
    config: RelayConfig,
    schema: Option<ColumnSchema>,
    submitter: BatchSubmitter,
    stats: RelayStats,
}

impl MetricRelay {
    /// Create a relay that submits through the given sink
    pub fn new(config: RelayConfig, sink: Arc<dyn MetricsSink>) -> Self {
        let submitter = BatchSubmitter::new(&config, sink);

        Self {
            config,
            schema: None,
            submitter,
            stats: RelayStats::new(),
        }
    }

    /// Ingest one line of the monitor log
    ///
    /// Never fails: schema problems and unparseable rows are logged,
    /// counted in the statistics, and dropped.
    pub async fn handle_line(&mut self, line: &str) {
        self.stats.lines_received += 1;
        let fields: Vec<&str> = line.split(',').collect();

        match &self.schema {
            // Width matches the schema: always a data row. A stray
            // reprint of the header at the same width is recognized and
            // discarded by the translator.
            Some(schema) if fields.len() == schema.len() => {
                let outcome = translate_row(schema, &fields, &self.config.dimensions);
                self.finish_row(outcome, line).await;
            }

            // Width changed and the line carries a timestamp column:
            // the server was reconfigured, re-derive the schema.
            Some(_) if is_header_line(&fields) => self.apply_header(&fields, line),

            Some(schema) => {
                let error = Error::schema_mismatch(schema.len(), fields.len());
                self.skip_row(&error, line);
            }

            None if is_header_line(&fields) => self.apply_header(&fields, line),

            None => {
                let error = Error::schema_missing(line);
                self.skip_row(&error, line);
            }
        }
    }

    /// Ingestion phase the relay is currently in
    pub fn state(&self) -> RelayState {
        if self.schema.is_some() {
            RelayState::Streaming
        } else {
            RelayState::AwaitingSchema
        }
    }

    /// Schema currently in effect, if any
    pub fn schema(&self) -> Option<&ColumnSchema> {
        self.schema.as_ref()
    }

    /// Running ingestion statistics
    pub fn stats(&self) -> &RelayStats {
        &self.stats
    }

    /// Number of batches the sink has rejected so far
    pub fn failed_batches(&self) -> u64 {
        self.submitter.failed_batches()
    }

    /// Configuration this relay was built with
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Derive a schema from a header line and install it
    ///
    /// The previous schema stays in effect when derivation fails, so a
    /// malformed header never leaves the relay worse off than before.
    fn apply_header(&mut self, fields: &[&str], line: &str) {
        match ColumnSchema::from_header(fields) {
            Ok(schema) => {
                self.stats.header_lines += 1;
                info!(
                    columns = schema.len(),
                    metrics = schema.metric_count(),
                    "Derived column schema from header line"
                );
                self.schema = Some(schema);
            }
            Err(error) => {
                warn!(%error, line, "Ignoring unusable header line");
                self.stats.rows_skipped += 1;
                self.stats.record_error(format!("{} (line: '{}')", error, line));
            }
        }
    }

    /// Account for a translated row
    async fn finish_row(&mut self, outcome: Result<RowOutcome>, line: &str) {
        match outcome {
            Ok(RowOutcome::Points(points)) => {
                self.stats.rows_translated += 1;
                self.stats.points_emitted += points.len();

                let batches = self.submitter.submit(points, line).await;
                self.stats.batches_submitted += batches;
            }
            Ok(RowOutcome::RepeatedHeader) => {
                debug!("Discarding repeated header line");
            }
            Err(error) => self.skip_row(&error, line),
        }
    }

    /// Drop a line, with the reason logged and recorded
    fn skip_row(&mut self, error: &Error, line: &str) {
        warn!(%error, line, "Skipping line");
        self.stats.rows_skipped += 1;
        self.stats.record_error(format!("{} (line: '{}')", error, line));
    }
}
