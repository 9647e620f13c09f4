//! Tabular loader: CSV text into typed rows.
//!
//! Structural problems (missing file, missing column, index past the header)
//! fail the whole load. Per-row data problems are collected as warnings and
//! the offending row is excluded; nothing is defaulted silently.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::types::{ChartItem, DataRecord, LoadReport, RowIssue, RowWarning, parse_number};
use crate::error::{ChartError, ChartResult};

/// Number of data rows returned by [`CsvTable::preview`] by default.
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Column selector: by header name (pie mode) or 0-based index (plot mode).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnRef {
    Name(String),
    Index(usize),
}

/// A column the caller needs, and whether its cells must parse as numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRequirement {
    pub column: ColumnRef,
    pub numeric: bool,
}

impl ColumnRequirement {
    #[must_use]
    pub fn text(column: ColumnRef) -> Self {
        Self {
            column,
            numeric: false,
        }
    }

    #[must_use]
    pub fn numeric(column: ColumnRef) -> Self {
        Self {
            column,
            numeric: true,
        }
    }
}

/// Header plus raw data rows, exactly as read. Rows may be ragged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Header and the first few rows, for inspection tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvPreview {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub total_rows: usize,
}

impl CsvTable {
    /// Reads a UTF-8 CSV file with a header row.
    pub fn from_path(path: impl AsRef<Path>) -> ChartResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ChartError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let table = Self::from_reader(file)?;
        debug!(
            path = %path.display(),
            columns = table.header.len(),
            rows = table.rows.len(),
            "loaded csv table"
        );
        Ok(table)
    }

    /// Reads CSV text with a header row from any reader.
    pub fn from_reader<R: Read>(reader: R) -> ChartResult<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let header = reader
            .headers()?
            .iter()
            .map(str::to_owned)
            .collect::<Vec<_>>();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_owned).collect());
        }

        Ok(Self { header, rows })
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    /// Resolves a header name to its position.
    pub fn column_position(&self, name: &str) -> ChartResult<usize> {
        self.header
            .iter()
            .position(|column| column == name)
            .ok_or_else(|| ChartError::MissingColumn {
                name: name.to_owned(),
                available: self.header.clone(),
            })
    }

    /// Checks that a 0-based index exists in the header.
    pub fn require_index(&self, role: &'static str, index: usize) -> ChartResult<usize> {
        if index < self.header.len() {
            Ok(index)
        } else {
            Err(ChartError::ColumnIndexOutOfRange {
                role,
                index,
                column_count: self.header.len(),
            })
        }
    }

    /// Resolves any column reference against the header.
    pub fn resolve(&self, column: &ColumnRef) -> ChartResult<usize> {
        match column {
            ColumnRef::Name(name) => self.column_position(name),
            ColumnRef::Index(index) => self.require_index("required", *index),
        }
    }

    /// Raw cell text; `None` when the row is shorter than `column`.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map(String::as_str)
    }

    /// Column name for warnings; falls back to `#index` for headerless slots.
    #[must_use]
    pub fn column_name(&self, column: usize) -> String {
        self.header
            .get(column)
            .cloned()
            .unwrap_or_else(|| format!("#{column}"))
    }

    /// All rows as header-keyed records. Missing trailing cells are omitted.
    #[must_use]
    pub fn records(&self) -> Vec<DataRecord> {
        self.rows.iter().map(|cells| self.record(cells)).collect()
    }

    fn record(&self, cells: &[String]) -> DataRecord {
        self.header
            .iter()
            .zip(cells)
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    #[must_use]
    pub fn preview(&self, rows: usize) -> CsvPreview {
        CsvPreview {
            header: self.header.clone(),
            rows: self.rows.iter().take(rows).cloned().collect(),
            total_rows: self.rows.len(),
        }
    }
}

/// Loads `path` and keeps the rows whose required cells are present (and
/// numeric where requested).
pub fn load(
    path: impl AsRef<Path>,
    requirements: &[ColumnRequirement],
) -> ChartResult<LoadReport<DataRecord>> {
    let table = CsvTable::from_path(path)?;
    load_records(&table, requirements)
}

/// Same as [`load`] for an already-read table.
pub fn load_records(
    table: &CsvTable,
    requirements: &[ColumnRequirement],
) -> ChartResult<LoadReport<DataRecord>> {
    let resolved = requirements
        .iter()
        .map(|requirement| Ok((table.resolve(&requirement.column)?, requirement.numeric)))
        .collect::<ChartResult<Vec<_>>>()?;

    let mut records = Vec::with_capacity(table.rows.len());
    let mut warnings = Vec::new();
    'rows: for (row_index, cells) in table.rows.iter().enumerate() {
        for &(column, numeric) in &resolved {
            let issue = match cells.get(column) {
                None => Some(RowIssue::MissingCell {
                    column: table.column_name(column),
                }),
                Some(raw) if numeric && parse_number(raw).is_none() => {
                    Some(RowIssue::NonNumeric {
                        column: table.column_name(column),
                        raw: raw.clone(),
                    })
                }
                Some(_) => None,
            };
            if let Some(issue) = issue {
                push_warning(&mut warnings, RowWarning::for_row(row_index, issue));
                continue 'rows;
            }
        }
        records.push(table.record(cells));
    }

    debug!(
        accepted = records.len(),
        skipped = warnings.len(),
        "loaded records"
    );
    Ok(LoadReport::new(records, warnings))
}

/// Reads `(label, value)` pairs for value charts.
///
/// Rows with a missing cell, a non-numeric value or a negative value are
/// skipped with a warning.
pub fn load_label_value(
    table: &CsvTable,
    label_column: &str,
    value_column: &str,
) -> ChartResult<LoadReport<ChartItem>> {
    let label_index = table.column_position(label_column)?;
    let value_index = table.column_position(value_column)?;

    let mut items = Vec::with_capacity(table.rows.len());
    let mut warnings = Vec::new();
    for (row_index, cells) in table.rows.iter().enumerate() {
        match label_value_from_row(cells, label_index, value_index, label_column, value_column)
        {
            Ok(item) => items.push(item),
            Err(issue) => push_warning(&mut warnings, RowWarning::for_row(row_index, issue)),
        }
    }

    debug!(
        label_column,
        value_column,
        accepted = items.len(),
        skipped = warnings.len(),
        "loaded label/value items"
    );
    Ok(LoadReport::new(items, warnings))
}

fn label_value_from_row(
    cells: &[String],
    label_index: usize,
    value_index: usize,
    label_column: &str,
    value_column: &str,
) -> Result<ChartItem, RowIssue> {
    let label = cells.get(label_index).ok_or_else(|| RowIssue::MissingCell {
        column: label_column.to_owned(),
    })?;
    let raw = cells
        .get(value_index)
        .filter(|raw| !raw.is_empty())
        .ok_or_else(|| RowIssue::MissingCell {
            column: value_column.to_owned(),
        })?;
    let value = parse_number(raw).ok_or_else(|| RowIssue::NonNumeric {
        column: value_column.to_owned(),
        raw: raw.clone(),
    })?;
    if value < 0.0 {
        return Err(RowIssue::NegativeValue {
            column: value_column.to_owned(),
            raw: raw.clone(),
        });
    }
    Ok(ChartItem::new(label.clone(), value))
}

pub(crate) fn push_warning(warnings: &mut Vec<RowWarning>, warning: RowWarning) {
    warn!(line = warning.line, issue = %warning.issue, "skipping row");
    warnings.push(warning);
}
