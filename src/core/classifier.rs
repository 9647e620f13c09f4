//! Column classifier used when label/value columns are not configured.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::loader::CsvTable;
use crate::core::types::parse_number;

/// Maximum number of data rows inspected per column.
pub const CLASSIFIER_SAMPLE_ROWS: usize = 5;

/// Keywords that mark a numeric column as the value column.
pub const VALUE_KEYWORDS: [&str; 5] = ["sales", "amount", "value", "count", "total"];

/// Keywords that mark a categorical column as the label column.
pub const LABEL_KEYWORDS: [&str; 5] = ["category", "item", "name", "description", "type"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnRole {
    Numeric,
    Categorical,
}

/// Columns picked for the label and value roles.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub label: Option<String>,
    pub value: Option<String>,
}

/// Classifies every header column from the first [`CLASSIFIER_SAMPLE_ROWS`] rows.
///
/// A column is numeric when at least 80% of its sampled non-empty cells parse
/// as numbers. Columns with no non-empty sample are categorical.
#[must_use]
pub fn classify(header: &[String], sample_rows: &[Vec<String>]) -> IndexMap<String, ColumnRole> {
    let sample = &sample_rows[..sample_rows.len().min(CLASSIFIER_SAMPLE_ROWS)];

    header
        .iter()
        .enumerate()
        .map(|(column, name)| {
            let mut non_empty = 0usize;
            let mut numeric = 0usize;
            for cell in sample.iter().filter_map(|row| row.get(column)) {
                if cell.trim().is_empty() {
                    continue;
                }
                non_empty += 1;
                if parse_number(cell).is_some() {
                    numeric += 1;
                }
            }

            // numeric / non_empty >= 0.8, in integers
            let role = if non_empty > 0 && numeric * 5 >= non_empty * 4 {
                ColumnRole::Numeric
            } else {
                ColumnRole::Categorical
            };
            (name.clone(), role)
        })
        .collect()
}

/// Convenience wrapper over [`classify`] for a loaded table.
#[must_use]
pub fn classify_table(table: &CsvTable) -> IndexMap<String, ColumnRole> {
    classify(&table.header, &table.rows)
}

/// Picks value and label columns from a classification.
///
/// A column whose lowercased name contains a role keyword wins; otherwise the
/// first column of the matching kind in header order. The label falls back to
/// the first remaining column when nothing is categorical.
#[must_use]
pub fn assign_roles(classification: &IndexMap<String, ColumnRole>) -> RoleAssignment {
    let value = pick(classification, ColumnRole::Numeric, &VALUE_KEYWORDS, None);
    let label = pick(
        classification,
        ColumnRole::Categorical,
        &LABEL_KEYWORDS,
        value.as_deref(),
    )
    .or_else(|| {
        classification
            .keys()
            .find(|name| Some(name.as_str()) != value.as_deref())
            .cloned()
    });

    debug!(?label, ?value, "assigned column roles");
    RoleAssignment { label, value }
}

fn pick(
    classification: &IndexMap<String, ColumnRole>,
    role: ColumnRole,
    keywords: &[&str],
    exclude: Option<&str>,
) -> Option<String> {
    let candidates = || {
        classification
            .iter()
            .filter(move |(name, column_role)| {
                **column_role == role && Some(name.as_str()) != exclude
            })
            .map(|(name, _)| name)
    };

    candidates()
        .find(|name| {
            let lowered = name.to_lowercase();
            keywords.iter().any(|keyword| lowered.contains(keyword))
        })
        .or_else(|| candidates().next())
        .cloned()
}
