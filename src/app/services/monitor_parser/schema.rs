//! Column schema derivation from header lines
//!
//! Analyzes a header line to assign every column a role: a named
//! metric with an optional unit, a skipped marker column, or the
//! timestamp column. The schema is rebuilt from scratch on every
//! header line, so column drift across server restarts just works.

use super::units::{classify_unit, normalize_token};
use crate::app::models::Unit;
use crate::constants::{header, is_total_exception};
use crate::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Runs of non-word characters, collapsed to a single space when
/// deriving metric names
static NON_WORD_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\W+").expect("static pattern compiles"));

/// Role assigned to one column of the tabular stream
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnRole {
    /// Relayed as a metric under the given name
    Metric { name: String, unit: Option<Unit> },

    /// Present in data rows but never relayed
    Skip,

    /// Holds the row timestamp in epoch milliseconds
    Timestamp,
}

/// Column schema derived from a header line
///
/// Holds one role per column plus the index of the timestamp column,
/// which every valid schema has exactly one of.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSchema {
    columns: Vec<ColumnRole>,
    timestamp_index: usize,
}

impl ColumnSchema {
    /// Derive a schema from the split fields of a header line
    ///
    /// Fails when no field normalizes to the timestamp token; callers
    /// keep their previous schema (if any) and may retry on a later
    /// line. Duplicate metric names are kept as independent columns.
    pub fn from_header(fields: &[&str]) -> Result<Self> {
        let mut columns = Vec::with_capacity(fields.len());
        let mut timestamp_index: Option<usize> = None;

        for (index, token) in fields.iter().enumerate() {
            let role = if is_skip_token(token) {
                ColumnRole::Skip
            } else if normalize_token(token) == header::TIMESTAMP {
                if timestamp_index.is_some() {
                    // Exactly one timestamp column per schema; later
                    // copies carry nothing new.
                    ColumnRole::Skip
                } else {
                    timestamp_index = Some(index);
                    ColumnRole::Timestamp
                }
            } else {
                match metric_name(token) {
                    Some(name) => ColumnRole::Metric {
                        name,
                        unit: classify_unit(token),
                    },
                    None => {
                        debug!(token, "Header token has no word characters, skipping column");
                        ColumnRole::Skip
                    }
                }
            };

            columns.push(role);
        }

        let timestamp_index = timestamp_index.ok_or_else(|| {
            Error::invalid_header("No timestamp column found in header line".to_string())
        })?;

        Ok(Self {
            columns,
            timestamp_index,
        })
    }

    /// Derive a schema from an unsplit header line
    pub fn from_header_line(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.split(',').collect();
        Self::from_header(&fields)
    }

    /// Roles in column order
    pub fn columns(&self) -> &[ColumnRole] {
        &self.columns
    }

    /// Number of columns a data row must have
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the schema has no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Index of the timestamp column
    pub fn timestamp_index(&self) -> usize {
        self.timestamp_index
    }

    /// Number of metric columns (datapoints per translated row)
    pub fn metric_count(&self) -> usize {
        self.columns
            .iter()
            .filter(|role| matches!(role, ColumnRole::Metric { .. }))
            .count()
    }
}

/// Check whether a split line is a header line
///
/// Data rows carry epoch milliseconds in the timestamp column, so a
/// field normalizing to the timestamp token can only come from a
/// header.
pub fn is_header_line(fields: &[&str]) -> bool {
    fields
        .iter()
        .any(|field| normalize_token(field) == header::TIMESTAMP)
}

/// Skip rules for header tokens: the separator marker, running-maximum
/// columns, and running-total columns other than the literal
/// exceptions. Prefix tests are case-sensitive on the raw token.
fn is_skip_token(token: &str) -> bool {
    if normalize_token(token) == header::SEPARATOR {
        return true;
    }

    if token.starts_with(header::MAX_PREFIX) {
        return true;
    }

    token.starts_with(header::TOTAL_PREFIX) && !is_total_exception(token)
}

/// Metric name for a header token: runs of non-word characters
/// collapsed to a single space, trimmed. `None` when nothing word-like
/// remains.
fn metric_name(token: &str) -> Option<String> {
    let name = NON_WORD_RUNS.replace_all(token, " ").trim().to_string();

    if name.is_empty() { None } else { Some(name) }
}
