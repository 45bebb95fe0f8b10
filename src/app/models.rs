//! Data models for the metric relay
//!
//! This module contains the core data structures exchanged between the
//! parsing and submission layers: measurement units, metric dimensions,
//! and the typed datapoints shipped to the metrics backend.

use crate::{Error, Result};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Measurement Unit Enumeration
// =============================================================================

/// Measurement units recognized by the unit classifier
///
/// The variants mirror the standard unit vocabulary of the downstream
/// metrics backend, so a sink can map them 1:1 onto its wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    /// Elapsed time measured in milliseconds
    Milliseconds,

    /// Memory size measured in bytes
    Bytes,

    /// Network throughput measured in kilobits per second
    KilobitsPerSecond,

    /// Event rate measured in occurrences per second
    CountPerSecond,

    /// Plain occurrence count
    Count,
}

impl Unit {
    /// Backend wire name for this unit
    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Milliseconds => "Milliseconds",
            Unit::Bytes => "Bytes",
            Unit::KilobitsPerSecond => "Kilobits/Second",
            Unit::CountPerSecond => "Count/Second",
            Unit::Count => "Count",
        }
    }

    /// Get all recognized units
    pub fn all_values() -> [Unit; 5] {
        [
            Unit::Milliseconds,
            Unit::Bytes,
            Unit::KilobitsPerSecond,
            Unit::CountPerSecond,
            Unit::Count,
        ]
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Unit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "Milliseconds" => Ok(Unit::Milliseconds),
            "Bytes" => Ok(Unit::Bytes),
            "Kilobits/Second" => Ok(Unit::KilobitsPerSecond),
            "Count/Second" => Ok(Unit::CountPerSecond),
            "Count" => Ok(Unit::Count),
            _ => Err(Error::configuration(format!(
                "Invalid unit name '{}': expected one of Milliseconds, Bytes, \
                 Kilobits/Second, Count/Second, Count",
                s
            ))),
        }
    }
}

// =============================================================================
// Metric Dimension Structure
// =============================================================================

/// A name/value pair attached to every datapoint of a submission
///
/// Dimensions qualify where a metric came from (host, region, cluster).
/// The relay attaches the configured dimension set uniformly to every
/// datapoint it emits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    /// Dimension name (e.g., "hostname")
    pub name: String,

    /// Dimension value (e.g., "web1.example.internal")
    pub value: String,
}

impl Dimension {
    /// Create a new dimension with validation
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let dimension = Self {
            name: name.into(),
            value: value.into(),
        };

        dimension.validate()?;
        Ok(dimension)
    }

    /// Validate that neither side of the pair is empty
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::configuration(
                "Dimension name cannot be empty".to_string(),
            ));
        }

        if self.value.trim().is_empty() {
            return Err(Error::configuration(format!(
                "Dimension '{}' has an empty value",
                self.name
            )));
        }

        Ok(())
    }

    /// Parse a dimension list from its string form `key=value,key2=value2`
    ///
    /// Whitespace around keys, values, and separators is tolerated.
    /// Empty segments (trailing commas) are skipped. An entry without
    /// `=` is a configuration error.
    pub fn parse_list(input: &str) -> Result<Vec<Dimension>> {
        let mut dimensions = Vec::new();

        for segment in input.split(',') {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }

            let (name, value) = segment.split_once('=').ok_or_else(|| {
                Error::configuration(format!(
                    "Invalid dimension entry '{}': expected key=value",
                    segment
                ))
            })?;

            dimensions.push(Dimension::new(name.trim(), value.trim())?);
        }

        Ok(dimensions)
    }

    /// Render a dimension list back into its `key=value,...` string form
    pub fn render_list(dimensions: &[Dimension]) -> String {
        dimensions
            .iter()
            .map(Dimension::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

// =============================================================================
// Datapoint Structure
// =============================================================================

/// One typed metric observation ready for submission
///
/// A translated data row yields one datapoint per metric column; all
/// datapoints of a row share the row timestamp and the configured
/// dimension set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Metric name derived from the header token
    pub metric_name: String,

    /// Unit classification, when one of the markers matched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,

    /// Observed value
    pub value: f64,

    /// Observation time taken from the row's timestamp column
    pub timestamp: DateTime<Utc>,

    /// Dimensions attached uniformly across the row
    pub dimensions: Vec<Dimension>,
}

impl DataPoint {
    /// Create a new datapoint with validation
    pub fn new(
        metric_name: impl Into<String>,
        unit: Option<Unit>,
        value: f64,
        timestamp: DateTime<Utc>,
        dimensions: Vec<Dimension>,
    ) -> Result<Self> {
        let point = Self {
            metric_name: metric_name.into(),
            unit,
            value,
            timestamp,
            dimensions,
        };

        point.validate()?;
        Ok(point)
    }

    /// Create a datapoint from an epoch-milliseconds timestamp
    pub fn from_epoch_millis(
        metric_name: impl Into<String>,
        unit: Option<Unit>,
        value: f64,
        epoch_millis: i64,
        dimensions: Vec<Dimension>,
    ) -> Result<Self> {
        let timestamp = Utc
            .timestamp_millis_opt(epoch_millis)
            .single()
            .ok_or_else(|| Error::timestamp_parse(epoch_millis.to_string()))?;

        Self::new(metric_name, unit, value, timestamp, dimensions)
    }

    /// Validate datapoint invariants
    pub fn validate(&self) -> Result<()> {
        if self.metric_name.trim().is_empty() {
            return Err(Error::invalid_header(
                "Metric name cannot be empty".to_string(),
            ));
        }

        // Backends reject NaN and infinite samples
        if !self.value.is_finite() {
            return Err(Error::value_parse(
                self.metric_name.clone(),
                self.value.to_string(),
            ));
        }

        Ok(())
    }
}
