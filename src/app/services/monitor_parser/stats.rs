//! Ingestion statistics for a running relay
//!
//! Tracks how many lines a relay has seen and what became of them, for
//! summary reporting and diagnostics.

/// Upper bound on retained error messages. Counters keep counting past
/// this; only the message list stops growing, since a relay may run
/// for months.
const MAX_RECORDED_ERRORS: usize = 100;

/// Counters describing everything a relay has ingested
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RelayStats {
    /// Total lines handed to the relay
    pub lines_received: usize,

    /// Header lines that established or replaced the schema
    pub header_lines: usize,

    /// Data rows successfully translated into datapoints
    pub rows_translated: usize,

    /// Data rows dropped (missing schema, width mismatch, parse failure)
    pub rows_skipped: usize,

    /// Datapoints emitted by translated rows
    pub points_emitted: usize,

    /// Dispatch calls issued to the sink
    pub batches_submitted: usize,

    /// Row-level error messages for diagnostics, bounded
    pub errors: Vec<String>,
}

impl RelayStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self {
            lines_received: 0,
            header_lines: 0,
            rows_translated: 0,
            rows_skipped: 0,
            points_emitted: 0,
            batches_submitted: 0,
            errors: Vec::new(),
        }
    }

    /// Number of lines treated as data rows
    pub fn data_rows(&self) -> usize {
        self.rows_translated + self.rows_skipped
    }

    /// Share of data rows that translated, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.data_rows() == 0 {
            0.0
        } else {
            (self.rows_translated as f64 / self.data_rows() as f64) * 100.0
        }
    }

    /// Record a row-level error message, dropping messages beyond the
    /// retention bound
    pub fn record_error(&mut self, message: String) {
        if self.errors.len() < MAX_RECORDED_ERRORS {
            self.errors.push(message);
        }
    }
}

impl Default for RelayStats {
    fn default() -> Self {
        Self::new()
    }
}
