//! Bar/scatter geometry: one primitive per valid row.
//!
//! Each axis is independently numeric, categorical or constant. Categorical
//! cells are mapped through a per-axis [`CategoryIndex`] in first-seen order,
//! and only rows that survive every check receive a category position.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::category::CategoryIndex;
use crate::core::color::{self, Color, ColorGradient, ColorRange, ColorRangeUnavailable};
use crate::core::geometry::{MeshGeometry, PrimitiveKind, Transform};
use crate::core::loader::{CsvTable, push_warning};
use crate::core::types::{RowIssue, RowWarning, parse_number};
use crate::error::{ChartError, ChartResult};

/// Non-positive scales are raised to this floor.
pub const MIN_PRIMITIVE_SCALE: f64 = 0.01;

/// Color used for category labels.
pub const LABEL_COLOR: Color = Color::WHITE;

/// How one axis obtains its coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AxisSpec {
    Numeric { column: usize },
    Categorical { column: usize },
    Constant { value: f64 },
}

impl AxisSpec {
    #[must_use]
    pub fn column(self) -> Option<usize> {
        match self {
            Self::Numeric { column } | Self::Categorical { column } => Some(column),
            Self::Constant { .. } => None,
        }
    }

    #[must_use]
    pub fn is_categorical(self) -> bool {
        matches!(self, Self::Categorical { .. })
    }
}

/// Fully resolved plot parameters for one build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSpec {
    pub x: AxisSpec,
    pub y: AxisSpec,
    pub z: AxisSpec,
    pub scale_column: Option<usize>,
    pub primitive: PrimitiveKind,
    pub color_column: Option<usize>,
    pub gradient: ColorGradient,
    pub alternating: Option<(Color, Color)>,
    pub categorical_spacing: f64,
    pub y_offset: f64,
    pub labels: bool,
    pub label_size: f64,
    pub axis_line: bool,
}

impl PlotSpec {
    /// Base height for bars, labels and the axis line.
    #[must_use]
    pub fn z_base(&self) -> f64 {
        match self.z {
            AxisSpec::Constant { value } => value,
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotPrimitive {
    pub name: String,
    /// Source line of the row, header = 1.
    pub line: usize,
    pub kind: PrimitiveKind,
    pub transform: Transform,
    pub color: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryLabel {
    pub text: String,
    pub location: Point3<f64>,
    pub size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLine {
    pub mesh: MeshGeometry,
    pub location: Point3<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisCategories {
    pub x: CategoryIndex,
    pub y: CategoryIndex,
    pub z: CategoryIndex,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotLayout {
    pub primitives: Vec<PlotPrimitive>,
    pub labels: Vec<CategoryLabel>,
    pub axis_line: Option<AxisLine>,
    pub categories: AxisCategories,
    /// `Some` only when gradient color mapping stayed active for the run.
    pub color_range: Option<ColorRange>,
    pub warnings: Vec<RowWarning>,
}

/// Raw value of one axis before category positions are assigned.
enum AxisValue<'a> {
    Number(f64),
    Category(&'a str),
}

/// Builds one primitive per valid row of `table`.
pub fn build_plot(table: &CsvTable, spec: &PlotSpec) -> ChartResult<PlotLayout> {
    for (role, column) in [
        ("X", spec.x.column()),
        ("Y", spec.y.column()),
        ("Z", spec.z.column()),
        ("scale", spec.scale_column),
        ("color", spec.color_column),
    ] {
        if let Some(column) = column {
            table.require_index(role, column)?;
        }
    }

    let color_range = spec
        .color_column
        .and_then(|column| observe_color_range(table, column));

    let mut categories = AxisCategories::default();
    let mut primitives = Vec::with_capacity(table.rows.len());
    let mut warnings = Vec::new();

    for (row_index, cells) in table.rows.iter().enumerate() {
        let resolved = resolve_row(table, cells, spec, color_range.is_some());
        let (x, y, z, scale, color_value) = match resolved {
            Ok(values) => values,
            Err(issue) => {
                push_warning(&mut warnings, RowWarning::for_row(row_index, issue));
                continue;
            }
        };

        let spacing = spec.categorical_spacing;
        let x = position(x, &mut categories.x, spacing);
        let y = position(y, &mut categories.y, spacing);
        let z = position(z, &mut categories.z, spacing);

        let (location, scale) = match spec.primitive {
            PrimitiveKind::Cube => (
                Point3::new(x, spec.y_offset + y, z + scale / 2.0),
                Vector3::new(1.0, 1.0, scale),
            ),
            _ => (
                Point3::new(x, spec.y_offset + y, z),
                Vector3::repeat(scale),
            ),
        };

        let sequence = primitives.len();
        let color = match (color_range, color_value) {
            (Some(range), Some(value)) => Some(spec.gradient.sample(range.normalize(value))),
            _ => spec
                .alternating
                .map(|(a, b)| color::alternating(sequence, a, b)),
        };

        primitives.push(PlotPrimitive {
            name: format!("CSV_{}_{}", spec.primitive.name(), row_index + 1),
            line: row_index + 2,
            kind: spec.primitive,
            transform: Transform::at(location).with_scale(scale),
            color,
        });
    }

    if primitives.is_empty() {
        return Err(ChartError::NoValidRows);
    }

    let labels = if spec.labels && spec.x.is_categorical() {
        category_labels(&categories.x, spec)
    } else {
        Vec::new()
    };
    let axis_line = (spec.axis_line && spec.x.is_categorical())
        .then(|| axis_line(&categories.x, spec))
        .flatten();

    debug!(
        primitives = primitives.len(),
        skipped = warnings.len(),
        x_categories = categories.x.len(),
        labels = labels.len(),
        "built plot layout"
    );

    Ok(PlotLayout {
        primitives,
        labels,
        axis_line,
        categories,
        color_range,
        warnings,
    })
}

type ResolvedRow<'a> = (AxisValue<'a>, AxisValue<'a>, AxisValue<'a>, f64, Option<f64>);

fn resolve_row<'a>(
    table: &CsvTable,
    cells: &'a [String],
    spec: &PlotSpec,
    color_mapping: bool,
) -> Result<ResolvedRow<'a>, RowIssue> {
    let x = axis_value(table, cells, spec.x)?;
    let y = axis_value(table, cells, spec.y)?;
    let z = axis_value(table, cells, spec.z)?;

    let scale = match spec.scale_column {
        Some(column) => numeric_cell(table, cells, column)?,
        None => 1.0,
    };
    let scale = if scale <= 0.0 {
        MIN_PRIMITIVE_SCALE
    } else {
        scale
    };

    let color_value = match spec.color_column {
        Some(column) if color_mapping => Some(numeric_cell(table, cells, column)?),
        _ => None,
    };

    Ok((x, y, z, scale, color_value))
}

fn axis_value<'a>(
    table: &CsvTable,
    cells: &'a [String],
    axis: AxisSpec,
) -> Result<AxisValue<'a>, RowIssue> {
    match axis {
        AxisSpec::Constant { value } => Ok(AxisValue::Number(value)),
        AxisSpec::Numeric { column } => numeric_cell(table, cells, column).map(AxisValue::Number),
        AxisSpec::Categorical { column } => cells
            .get(column)
            .map(|cell| AxisValue::Category(cell.as_str()))
            .ok_or_else(|| RowIssue::MissingCell {
                column: table.column_name(column),
            }),
    }
}

fn numeric_cell(table: &CsvTable, cells: &[String], column: usize) -> Result<f64, RowIssue> {
    let raw = cells
        .get(column)
        .filter(|raw| !raw.is_empty())
        .ok_or_else(|| RowIssue::MissingCell {
            column: table.column_name(column),
        })?;
    parse_number(raw).ok_or_else(|| RowIssue::NonNumeric {
        column: table.column_name(column),
        raw: raw.clone(),
    })
}

fn position(value: AxisValue<'_>, index: &mut CategoryIndex, spacing: f64) -> f64 {
    match value {
        AxisValue::Number(number) => number,
        AxisValue::Category(category) => index.index_of(category) as f64 * spacing,
    }
}

/// Observed span of the color column, or `None` when mapping must be disabled.
fn observe_color_range(table: &CsvTable, column: usize) -> Option<ColorRange> {
    let samples = table
        .rows
        .iter()
        .filter_map(|cells| cells.get(column))
        .filter_map(|raw| parse_number(raw));

    match ColorRange::from_samples(samples) {
        Ok(range) => Some(range),
        Err(ColorRangeUnavailable::NoSamples) => {
            warn!(column, "no numeric samples in color column; color mapping disabled");
            None
        }
        Err(ColorRangeUnavailable::ZeroRange { value }) => {
            warn!(column, value, "color column has zero range; color mapping disabled");
            None
        }
    }
}

fn category_labels(index: &CategoryIndex, spec: &PlotSpec) -> Vec<CategoryLabel> {
    let y = spec.y_offset - spec.categorical_spacing / 4.0;
    let z = spec.z_base() - 0.5;
    index
        .categories()
        .enumerate()
        .map(|(position, text)| CategoryLabel {
            text: text.to_owned(),
            location: Point3::new(position as f64 * spec.categorical_spacing, y, z),
            size: spec.label_size,
        })
        .collect()
}

fn axis_line(index: &CategoryIndex, spec: &PlotSpec) -> Option<AxisLine> {
    let last = index.len().checked_sub(1)?;
    let mut mesh = MeshGeometry::default();
    let start = mesh.push_vertex(Point3::new(-0.5, 0.0, 0.0));
    let end = mesh.push_vertex(Point3::new(
        last as f64 * spec.categorical_spacing + 0.5,
        0.0,
        0.0,
    ));
    mesh.edges.push([start, end]);
    Some(AxisLine {
        mesh,
        location: Point3::new(0.0, spec.y_offset, spec.z_base()),
    })
}
