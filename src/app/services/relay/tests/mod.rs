//! Test utilities for relay pipeline testing
//!
//! Builds relays over the mock sinks from the metric sink test module
//! so pipeline tests can observe exactly what got submitted.

use std::sync::Arc;

use crate::app::models::Dimension;
use crate::app::services::metric_sink::tests::CapturingSink;
use crate::app::services::relay::MetricRelay;
use crate::config::RelayConfig;


/// Helper to create a relay configuration with deterministic dimensions
pub fn create_test_config() -> RelayConfig {
    RelayConfig::default()
        .with_namespace("TestNamespace")
        .with_dimensions(vec![Dimension::new("hostname", "web1").unwrap()])
}

/// Helper to create a relay wired to a capturing sink
pub fn create_test_relay() -> (MetricRelay, Arc<CapturingSink>) {
    let sink = Arc::new(CapturingSink::new());
    let relay = MetricRelay::new(create_test_config(), sink.clone());
    (relay, sink)
}
