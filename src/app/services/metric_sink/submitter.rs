//! Batching and fire-and-forget dispatch
//!
//! Splits a translated row's datapoints into transport-sized batches
//! and spawns one submission task per batch. Callers get the number of
//! dispatches back immediately; transport failures surface only in the
//! log and the failure counter, never as errors on the ingestion path.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::warn;

use crate::app::models::DataPoint;
use crate::app::services::metric_sink::{MetricsSink, PutMetricsRequest};
use crate::config::RelayConfig;
use crate::constants::MAX_BATCH_SIZE;

/// Fans translated datapoints out to the configured sink
pub struct BatchSubmitter {
    sink: Arc<dyn MetricsSink>,
    namespace: String,
    storage_resolution_seconds: Option<u32>,
    failed_batches: Arc<AtomicU64>,
}

impl BatchSubmitter {
    /// Create a new submitter bound to a sink
    pub fn new(config: &RelayConfig, sink: Arc<dyn MetricsSink>) -> Self {
        Self {
            sink,
            namespace: config.namespace.clone(),
            storage_resolution_seconds: config.storage_resolution_seconds,
            failed_batches: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Submit datapoints in batches of at most [`MAX_BATCH_SIZE`]
    ///
    /// Each batch is dispatched on its own task and the call returns
    /// without waiting for any of them. `source_line` is the raw input
    /// line the points came from; it is echoed in the warning when a
    /// batch fails so the lost data can be found in the source log.
    ///
    /// Returns the number of batches dispatched.
    pub async fn submit(&self, points: Vec<DataPoint>, source_line: &str) -> usize {
        if points.is_empty() {
            return 0;
        }

        let mut dispatched = 0;
        for chunk in points.chunks(MAX_BATCH_SIZE) {
            let request = PutMetricsRequest {
                namespace: self.namespace.clone(),
                data_points: chunk.to_vec(),
                storage_resolution_seconds: self.storage_resolution_seconds,
            };

            let sink = Arc::clone(&self.sink);
            let failed = Arc::clone(&self.failed_batches);
            let line = source_line.to_string();
            tokio::spawn(async move {
                if let Err(error) = sink.put_metrics(request).await {
                    failed.fetch_add(1, Ordering::Relaxed);
                    warn!(
                        sink = sink.name(),
                        %error,
                        line,
                        "Unable to put metric batch"
                    );
                }
            });
            dispatched += 1;
        }

        dispatched
    }

    /// Number of batches the sink has rejected so far
    pub fn failed_batches(&self) -> u64 {
        self.failed_batches.load(Ordering::Relaxed)
    }

    /// Name of the sink this submitter dispatches to
    pub fn sink_name(&self) -> &'static str {
        self.sink.name()
    }
}

impl fmt::Debug for BatchSubmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchSubmitter")
            .field("sink", &self.sink.name())
            .field("namespace", &self.namespace)
            .field(
                "storage_resolution_seconds",
                &self.storage_resolution_seconds,
            )
            .field("failed_batches", &self.failed_batches.load(Ordering::Relaxed))
            .finish()
    }
}
