//! Metric submission layer
//!
//! This module owns everything between translated datapoints and the
//! metrics backend: the transport trait implementations plug into, the
//! batch splitter that issues fire-and-forget dispatches, and a logging
//! stand-in sink for offline use.
//!
//! ## Architecture
//!
//! - [`sink`] - The `MetricsSink` transport trait and request envelope
//! - [`submitter`] - Fixed-size batching and asynchronous dispatch
//! - [`logging`] - A sink that logs batches instead of shipping them
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use metric_relay::app::services::metric_sink::{BatchSubmitter, LoggingSink};
//! use metric_relay::RelayConfig;
//!
//! # async fn example(points: Vec<metric_relay::DataPoint>) {
//! let config = RelayConfig::default();
//! let submitter = BatchSubmitter::new(&config, Arc::new(LoggingSink));
//!
//! // Issues ceil(N / 20) dispatch calls and returns immediately.
//! let batches = submitter.submit(points, "raw,source,line").await;
//! assert!(batches <= 3);
//! # }
//! ```

pub mod logging;
pub mod sink;
pub mod submitter;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use logging::LoggingSink;
pub use sink::{MetricsSink, PutMetricsRequest};
pub use submitter::BatchSubmitter;
