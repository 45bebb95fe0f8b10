//! Relay pipeline connecting the monitor parser to the metric sink
//!
//! This module provides the stateful controller that consumes a monitor
//! log line by line, derives and tracks the column schema, and hands
//! translated datapoints to the submission layer. It is the one piece
//! that owns mutable state; parsing and submission stay stateless
//! underneath it.
//!
//! ## Architecture
//!
//! The pipeline is organized into logical components:
//! - [`pipeline`] - Line-by-line ingestion state machine
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use metric_relay::app::services::metric_sink::LoggingSink;
//! use metric_relay::app::services::relay::MetricRelay;
//! use metric_relay::config::RelayConfig;
//!
//! # async fn example() {
//! let mut relay = MetricRelay::new(RelayConfig::default(), Arc::new(LoggingSink));
//!
//! relay.handle_line("Threads,HeapTotal,time").await;
//! relay.handle_line("12,5120,1700000000000").await;
//!
//! println!(
//!     "{} rows -> {} datapoints",
//!     relay.stats().rows_translated,
//!     relay.stats().points_emitted
//! );
//! # }
//! ```

pub mod pipeline;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use pipeline::{MetricRelay, RelayState};
