//! Parser for self-describing monitor statistics lines
//!
//! This module turns the comma-separated lines of a server statistics
//! log into typed datapoints. The stream is self-describing: a header
//! line names every column, and all following lines are positionally
//! aligned data rows. Nothing about the column set is compiled in; the
//! schema is derived from the header each time one is seen.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`schema`] - Column role assignment from header lines
//! - [`units`] - Token normalization and unit classification
//! - [`row`] - Translation of data rows into datapoints
//! - [`stats`] - Ingestion statistics
//!
//! ## Usage
//!
//! ```rust
//! use metric_relay::app::services::monitor_parser::{translate_row, ColumnSchema, RowOutcome};
//!
//! # fn example() -> metric_relay::Result<()> {
//! let schema = ColumnSchema::from_header_line("Threads,HeapTotal,time")?;
//! let fields: Vec<&str> = "12,5120,1700000000000".split(',').collect();
//!
//! match translate_row(&schema, &fields, &[])? {
//!     RowOutcome::Points(points) => assert_eq!(points.len(), 2),
//!     RowOutcome::RepeatedHeader => unreachable!(),
//! }
//! # Ok(())
//! # }
//! ```

pub mod row;
pub mod schema;
pub mod stats;
pub mod units;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use row::{RowOutcome, translate_row};
pub use schema::{ColumnRole, ColumnSchema, is_header_line};
pub use stats::RelayStats;
pub use units::{classify_unit, normalize_token};
