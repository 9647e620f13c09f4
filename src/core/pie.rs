//! Pie geometry: slice angles, wedge prisms, label anchors, explode offsets.

use std::cmp::Reverse;
use std::f64::consts::{FRAC_PI_2, TAU};

use nalgebra::{Point3, Vector3};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::geometry::MeshGeometry;
use crate::core::types::ChartItem;
use crate::error::{ChartError, ChartResult};

/// Sweeps at or above `TAU - FULL_CIRCLE_EPSILON` are closed rings without end caps.
pub const FULL_CIRCLE_EPSILON: f64 = 0.001;

/// Item ordering applied before angles are assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortPolicy {
    /// Keep input row order.
    #[default]
    None,
    ValueDescending,
    LabelAscending,
}

impl SortPolicy {
    /// Stable reorder; ties keep input order.
    pub fn apply(self, items: &mut [ChartItem]) {
        match self {
            Self::None => {}
            Self::ValueDescending => items.sort_by_key(|item| Reverse(OrderedFloat(item.value))),
            Self::LabelAscending => items.sort_by(|a, b| a.label.cmp(&b.label)),
        }
    }
}

/// Label orientation around the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LabelOrientation {
    /// Upright, turned to face radially outward from the slice.
    #[default]
    Radial,
    /// Upright, facing the front of the scene for every slice.
    Horizontal,
}

/// Angular layout of one slice, in render order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliceLayout {
    pub index: usize,
    pub label: String,
    pub value: f64,
    /// Share of the total in [0, 1].
    pub percentage: f64,
    pub start_angle: f64,
    pub sweep_angle: f64,
}

impl SliceLayout {
    #[must_use]
    pub fn mid_angle(&self) -> f64 {
        self.start_angle + self.sweep_angle / 2.0
    }

    #[must_use]
    pub fn end_angle(&self) -> f64 {
        self.start_angle + self.sweep_angle
    }

    #[must_use]
    pub fn is_full_circle(&self) -> bool {
        is_full_circle(self.sweep_angle)
    }

    /// Text shown next to the slice, e.g. `Rent (42.5%)`.
    #[must_use]
    pub fn label_text(&self) -> String {
        format!("{} ({:.1}%)", self.label, self.percentage * 100.0)
    }
}

#[must_use]
pub fn is_full_circle(sweep_angle: f64) -> bool {
    sweep_angle >= TAU - FULL_CIRCLE_EPSILON
}

/// Assigns contiguous angles to `items` in the given order, starting at 0.
///
/// Fails on an empty list, a negative or non-finite value, or a zero total.
pub fn layout_slices(items: &[ChartItem]) -> ChartResult<Vec<SliceLayout>> {
    if items.is_empty() {
        return Err(ChartError::NoValidRows);
    }
    if let Some(item) = items
        .iter()
        .find(|item| !item.value.is_finite() || item.value < 0.0)
    {
        return Err(ChartError::InvalidData(format!(
            "slice `{}` has invalid value {}",
            item.label, item.value
        )));
    }

    let total: f64 = items.iter().map(|item| item.value).sum();
    if total <= 0.0 {
        return Err(ChartError::ZeroTotal);
    }

    let mut start_angle = 0.0;
    let slices = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let percentage = item.value / total;
            let sweep_angle = percentage * TAU;
            let slice = SliceLayout {
                index,
                label: item.label.clone(),
                value: item.value,
                percentage,
                start_angle,
                sweep_angle,
            };
            start_angle += sweep_angle;
            slice
        })
        .collect();
    Ok(slices)
}

/// Prism parameters for one wedge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WedgeSpec {
    pub start_angle: f64,
    pub sweep_angle: f64,
    pub radius: f64,
    pub height: f64,
    pub subdivisions: usize,
}

impl WedgeSpec {
    #[must_use]
    pub fn for_slice(slice: &SliceLayout, radius: f64, height: f64, subdivisions: usize) -> Self {
        Self {
            start_angle: slice.start_angle,
            sweep_angle: slice.sweep_angle,
            radius,
            height,
            subdivisions,
        }
    }
}

/// Builds the wedge prism around the z axis, base at z = 0.
///
/// Vertex layout: base center, top center, then `subdivisions + 1` rim samples
/// as interleaved (base, top) pairs. Faces: base fan (reversed so its normal
/// points down), top fan, one quad per subdivision, and two radial caps unless
/// the sweep closes the circle.
pub fn build_wedge(spec: WedgeSpec) -> ChartResult<MeshGeometry> {
    if spec.subdivisions == 0 {
        return Err(ChartError::InvalidData(
            "wedge subdivisions must be >= 1".to_owned(),
        ));
    }

    let n = spec.subdivisions;
    let caps = !is_full_circle(spec.sweep_angle);
    let mut mesh = MeshGeometry::with_capacity(2 + 2 * (n + 1), n + 2 + if caps { 2 } else { 0 });

    let base_center = mesh.push_vertex(Point3::origin());
    let top_center = mesh.push_vertex(Point3::new(0.0, 0.0, spec.height));
    let rim_start = mesh.vertices.len();
    for j in 0..=n {
        let theta = spec.start_angle + (j as f64 / n as f64) * spec.sweep_angle;
        let (sin, cos) = theta.sin_cos();
        let x = spec.radius * cos;
        let y = spec.radius * sin;
        mesh.push_vertex(Point3::new(x, y, 0.0));
        mesh.push_vertex(Point3::new(x, y, spec.height));
    }
    let base = |j: usize| rim_start + j * 2;
    let top = |j: usize| rim_start + j * 2 + 1;

    mesh.push_face(std::iter::once(base_center).chain((0..=n).rev().map(base)));
    mesh.push_face(std::iter::once(top_center).chain((0..=n).map(top)));
    for j in 0..n {
        mesh.push_face([base(j), top(j), top(j + 1), base(j + 1)]);
    }
    if caps {
        mesh.push_face([base_center, top_center, top(0), base(0)]);
        mesh.push_face([base_center, base(n), top(n), top_center]);
    }

    Ok(mesh)
}

/// World offset of an exploded slice: `radius * factor` along the mid-angle.
#[must_use]
pub fn explode_offset(slice: &SliceLayout, radius: f64, factor: f64) -> Point3<f64> {
    let (sin, cos) = slice.mid_angle().sin_cos();
    let distance = radius * factor;
    Point3::new(distance * cos, distance * sin, 0.0)
}

/// Label location and Euler rotation for a slice.
#[must_use]
pub fn label_anchor(
    slice: &SliceLayout,
    radius: f64,
    height: f64,
    text_offset: f64,
    orientation: LabelOrientation,
) -> (Point3<f64>, Vector3<f64>) {
    let mid = slice.mid_angle();
    let (sin, cos) = mid.sin_cos();
    let distance = radius + text_offset;
    let location = Point3::new(distance * cos, distance * sin, height / 2.0);
    let yaw = match orientation {
        LabelOrientation::Radial => mid + FRAC_PI_2,
        LabelOrientation::Horizontal => 0.0,
    };
    (location, Vector3::new(FRAC_PI_2, 0.0, yaw))
}
