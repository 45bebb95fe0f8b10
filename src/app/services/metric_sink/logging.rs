//! Log-only sink used by the CLI and as a wiring example

use async_trait::async_trait;
use tracing::{debug, info};

use crate::Result;
use crate::app::services::metric_sink::{MetricsSink, PutMetricsRequest};

/// Sink that writes batches to the log instead of a remote backend
///
/// Useful for dry runs and for verifying schema and unit extraction
/// before pointing the relay at a real transport.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingSink;

#[async_trait]
impl MetricsSink for LoggingSink {
    async fn put_metrics(&self, request: PutMetricsRequest) -> Result<()> {
        info!(
            namespace = request.namespace,
            points = request.data_points.len(),
            resolution = ?request.storage_resolution_seconds,
            "Putting metric batch"
        );
        for point in &request.data_points {
            debug!(
                metric = point.metric_name,
                value = point.value,
                unit = ?point.unit,
                timestamp = %point.timestamp,
                "  datapoint"
            );
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "logging"
    }
}
