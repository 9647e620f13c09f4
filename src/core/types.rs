use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One CSV data row keyed by header name, in header order.
pub type DataRecord = IndexMap<String, String>;

/// Animation frame number on the host timeline.
pub type Frame = i64;

/// One pie/value chart entry. `value` is always finite and `>= 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartItem {
    pub label: String,
    pub value: f64,
}

impl ChartItem {
    #[must_use]
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Why a single row was dropped (or partially downgraded) during a pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum RowIssue {
    #[error("missing cell for column `{column}`")]
    MissingCell { column: String },

    #[error("non-numeric value `{raw}` in column `{column}`")]
    NonNumeric { column: String, raw: String },

    #[error("negative value `{raw}` in column `{column}`")]
    NegativeValue { column: String, raw: String },
}

/// Row-level data problem. `line` is the 1-based line in the source file,
/// counting the header as line 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("row {line}: {issue}")]
pub struct RowWarning {
    pub line: usize,
    pub issue: RowIssue,
}

impl RowWarning {
    /// Builds a warning for the data row at 0-based `row_index`.
    #[must_use]
    pub fn for_row(row_index: usize, issue: RowIssue) -> Self {
        Self {
            line: row_index + 2,
            issue,
        }
    }
}

/// Result of a tolerant pass: accepted items plus every skipped row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadReport<T> {
    pub items: Vec<T>,
    pub warnings: Vec<RowWarning>,
}

impl<T> LoadReport<T> {
    #[must_use]
    pub fn new(items: Vec<T>, warnings: Vec<RowWarning>) -> Self {
        Self { items, warnings }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Parses one cell as a finite number. Surrounding whitespace is ignored.
#[must_use]
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}
