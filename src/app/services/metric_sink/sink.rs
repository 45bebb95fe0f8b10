//! Transport trait for metric submission
//!
//! The relay core never talks to a concrete backend; it hands batches
//! to whatever [`MetricsSink`] was injected at construction time. Real
//! vendor clients live outside this crate and implement the trait.

use crate::Result;
use crate::app::models::DataPoint;
use async_trait::async_trait;

/// One dispatch call's worth of datapoints plus submission metadata
#[derive(Debug, Clone, PartialEq)]
pub struct PutMetricsRequest {
    /// Namespace the datapoints are filed under
    pub namespace: String,

    /// At most [`MAX_BATCH_SIZE`] datapoints, in emission order
    ///
    /// [`MAX_BATCH_SIZE`]: crate::constants::MAX_BATCH_SIZE
    pub data_points: Vec<DataPoint>,

    /// Storage resolution hint in seconds, when configured
    pub storage_resolution_seconds: Option<u32>,
}

/// Asynchronous transport for metric batches
///
/// Implementations must be safe to call concurrently: the submitter
/// observes completions on spawned tasks, so `put_metrics` may run on
/// any worker thread. A returned error means the batch is lost; the
/// submitter logs it and moves on, there is no retry.
#[async_trait]
pub trait MetricsSink: Send + Sync {
    /// Submit one batch of datapoints
    async fn put_metrics(&self, request: PutMetricsRequest) -> Result<()>;

    /// Short backend name for logging
    fn name(&self) -> &'static str;
}
