//! Metric Relay Library
//!
//! A Rust library for relaying self-describing tabular statistics logs
//! (comma-separated lines with a leading header row) to a pluggable
//! metrics backend as typed, batched datapoints.
//!
//! This library provides tools for:
//! - Deriving a column schema from a header line (metric names, unit
//!   classification, skip markers, timestamp column)
//! - Translating data rows into typed datapoints with shared timestamp
//!   and dimensions
//! - Submitting datapoints in fixed-size batches through an injected
//!   asynchronous transport, fire-and-forget
//! - Tolerating malformed rows, stray repeated headers, and schema
//!   drift without interrupting the stream
//! - Comprehensive error handling and recovery

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod metric_sink;
        pub mod monitor_parser;
        pub mod relay;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{DataPoint, Dimension, Unit};
pub use app::services::metric_sink::{MetricsSink, PutMetricsRequest};
pub use app::services::relay::{MetricRelay, RelayState};
pub use config::RelayConfig;

/// Result type alias for the metric relay
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error types for relay operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Header line could not produce a schema
    #[error("Header error: {message}")]
    InvalidHeader { message: String },

    /// Data row arrived before any header line
    #[error("Schema missing: no header seen before data row '{line}'")]
    SchemaMissing { line: String },

    /// Row width does not match the active schema
    #[error("Schema mismatch: row has {found} columns, schema expects {expected}")]
    SchemaMismatch { expected: usize, found: usize },

    /// Timestamp column value is not integer epoch milliseconds
    #[error("Timestamp parsing error: '{value}' is not epoch milliseconds")]
    TimestampParse { value: String },

    /// Metric column value is not a floating point number
    #[error("Value parsing error: column '{column}' holds non-numeric value '{value}'")]
    ValueParse { column: String, value: String },

    /// Asynchronous submission to the metrics backend failed
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create an invalid header error
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }

    /// Create a schema missing error carrying the offending row
    pub fn schema_missing(line: impl Into<String>) -> Self {
        Self::SchemaMissing { line: line.into() }
    }

    /// Create a schema mismatch error
    pub fn schema_mismatch(expected: usize, found: usize) -> Self {
        Self::SchemaMismatch { expected, found }
    }

    /// Create a timestamp parsing error
    pub fn timestamp_parse(value: impl Into<String>) -> Self {
        Self::TimestampParse {
            value: value.into(),
        }
    }

    /// Create a value parsing error for a named column
    pub fn value_parse(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::ValueParse {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Create a transport error with a simple message
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Create a transport error wrapping an underlying backend error
    pub fn transport_with_source(
        message: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::Transport {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Self::Configuration {
            message: format!("invalid TOML configuration: {error}"),
        }
    }
}
