//! Test utilities and mock sinks for metric submission testing
//!
//! This module provides the mock sink implementations and datapoint
//! helpers used across the submission and relay test modules.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crate::app::models::{DataPoint, Dimension, Unit};
use crate::app::services::metric_sink::{MetricsSink, PutMetricsRequest};
use crate::{Error, Result};


/// Mock sink that records every request it receives
#[derive(Debug, Default)]
pub struct CapturingSink {
    requests: Mutex<Vec<PutMetricsRequest>>,
}

impl CapturingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all captured requests, in arrival order
    pub fn requests(&self) -> Vec<PutMetricsRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn batch_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn point_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|request| request.data_points.len())
            .sum()
    }
}

#[async_trait]
impl MetricsSink for CapturingSink {
    async fn put_metrics(&self, request: PutMetricsRequest) -> Result<()> {
        self.requests.lock().unwrap().push(request);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "capturing"
    }
}

/// Mock sink that rejects every request
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingSink;

#[async_trait]
impl MetricsSink for FailingSink {
    async fn put_metrics(&self, _request: PutMetricsRequest) -> Result<()> {
        Err(Error::transport("backend unavailable".to_string()))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// Helper to build a run of sequentially valued datapoints
pub fn sample_points(count: usize) -> Vec<DataPoint> {
    let timestamp = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();

    (0..count)
        .map(|i| {
            DataPoint::new(
                format!("metric {}", i),
                Some(Unit::Count),
                i as f64,
                timestamp,
                vec![Dimension {
                    name: "hostname".to_string(),
                    value: "web1".to_string(),
                }],
            )
            .unwrap()
        })
        .collect()
}

/// Helper that lets spawned submission tasks run to completion
///
/// Submission happens on detached tasks. The mock sinks never block,
/// so a handful of yields on the test runtime is enough for every
/// spawned task to finish before assertions run.
pub async fn drain_spawned_tasks() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}
