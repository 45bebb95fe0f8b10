//! Test utilities for the monitor parser
//!
//! Provides the canonical monitor header fixture and row builders used
//! across the parser test modules.

use crate::app::models::Dimension;

// Test modules
mod row_tests;

/// A full monitor header as the statistics logger prints it: 40
/// columns mixing plain metrics, `max `/`total ` running aggregates,
/// `separator` markers, and the trailing timestamp column.
pub const MONITOR_HEADER: &str = "total threads,total heap,free heap,sessions,max sessions,\
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

/// Columns in [`MONITOR_HEADER`]
pub const MONITOR_COLUMNS: usize = 40;

/// Metric columns in [`MONITOR_HEADER`] (skips and the timestamp
/// column excluded)
pub const MONITOR_METRICS: usize = 29;

/// Build a data row aligned with [`MONITOR_HEADER`]: sequential values
/// with the given timestamp in the trailing column.
pub fn monitor_row(epoch_millis: i64) -> String {
    let fields: Vec<String> = (0..MONITOR_COLUMNS)
        .map(|index| {
            if index == MONITOR_COLUMNS - 1 {
                epoch_millis.to_string()
            } else {
                (index + 1).to_string()
            }
        })
        .collect();

    fields.join(",")
}

/// Split a line the way the relay does
pub fn split(line: &str) -> Vec<&str> {
    line.split(',').collect()
}

/// Dimension set used by row translation tests
pub fn test_dimensions() -> Vec<Dimension> {
    vec![Dimension {
        name: "hostname".to_string(),
        value: "web1".to_string(),
    }]
}
