//! Application constants for the metric relay
//!
//! This module contains the submission defaults, header token literals,
//! and unit classification markers used throughout the relay.

// =============================================================================
// Submission Defaults
// =============================================================================

/// Default metric namespace attached to every submission
pub const DEFAULT_NAMESPACE: &str = "Lightstreamer";

/// Maximum number of datapoints per dispatch call
pub const MAX_BATCH_SIZE: usize = 20;

/// Default storage resolution hint in seconds (standard resolution)
pub const DEFAULT_STORAGE_RESOLUTION_SECS: u32 = 60;

/// Name of the dimension carrying the local machine name
pub const HOSTNAME_DIMENSION: &str = "hostname";

// =============================================================================
// Header Token Constants
// =============================================================================

/// Literal tokens recognized in header lines
pub mod header {
    /// Column marker carrying no data (visual divider in the source log)
    pub const SEPARATOR: &str = "separator";

    /// Column holding the row timestamp in epoch milliseconds
    pub const TIMESTAMP: &str = "time";

    /// Raw-token prefix marking running-maximum columns (skipped)
    pub const MAX_PREFIX: &str = "max ";

    /// Raw-token prefix marking running-total columns (skipped)
    pub const TOTAL_PREFIX: &str = "total ";

    /// Running-total columns that are nevertheless relayed as metrics.
    /// Literal, case-sensitive matches against the raw token.
    pub const TOTAL_EXCEPTIONS: &[&str] = &["total threads", "total heap"];
}

// =============================================================================
// Unit Classification Markers
// =============================================================================

/// Substring markers used by the unit classifier, tested against the
/// normalized header token. Ordering of the tests lives in the
/// classifier itself: `kbit/s` must be recognized before `/s`.
pub mod unit_markers {
    pub const MILLISECONDS: &[&str] = &["time", "wait"];
    pub const BYTES: &[&str] = &["heap"];
    pub const KILOBITS_PER_SECOND: &[&str] = &["kbit/s"];
    pub const COUNT_PER_SECOND: &[&str] = &["/s"];
    pub const COUNT: &[&str] = &["added", "closed"];
}

// =============================================================================
// Environment Variables
// =============================================================================

/// Environment variable overriding the metric namespace
pub const ENV_NAMESPACE: &str = "METRIC_RELAY_NAMESPACE";

/// Environment variable overriding the storage resolution in seconds
pub const ENV_RESOLUTION: &str = "METRIC_RELAY_RESOLUTION";

/// Environment variable overriding the dimension list (`key=value,...`)
pub const ENV_DIMENSIONS: &str = "METRIC_RELAY_DIMENSIONS";

// =============================================================================
// File Tailing Constants
// =============================================================================

/// Poll interval when following a log file with no new data
pub const TAIL_POLL_INTERVAL_MS: u64 = 500;

// =============================================================================
// Helper Functions
// =============================================================================

/// Number of dispatch calls needed to submit `points` datapoints
pub fn batch_count(points: usize) -> usize {
    points.div_ceil(MAX_BATCH_SIZE)
}

/// Check whether a raw header token is one of the literal running-total
/// exceptions that stay metrics
pub fn is_total_exception(token: &str) -> bool {
    header::TOTAL_EXCEPTIONS.contains(&token)
}
