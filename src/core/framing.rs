//! Camera and light placement derived from generated geometry.

use std::f64::consts::FRAC_PI_2;

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::core::color::Color;

/// Camera distance from the framed center, in multiples of the largest extent.
const CAMERA_DISTANCE_FACTOR: f64 = 1.5;
const CLIP_END_FACTOR: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CameraPreset {
    #[default]
    None,
    Front,
    Top,
    Isometric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LightingPreset {
    #[default]
    None,
    Sun,
    Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightKind {
    Sun,
    Point,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraSpec {
    pub name: String,
    pub location: Point3<f64>,
    /// Euler XYZ, radians.
    pub rotation: Vector3<f64>,
    pub clip_end: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightSpec {
    pub name: String,
    pub kind: LightKind,
    pub location: Point3<f64>,
    pub rotation: Vector3<f64>,
    pub energy: f64,
}

/// Axis-aligned bounds accumulated from points and boxes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds3 {
    extent: Option<(Point3<f64>, Point3<f64>)>,
}

impl Bounds3 {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include_point(&mut self, point: Point3<f64>) {
        self.extent = Some(match self.extent {
            None => (point, point),
            Some((min, max)) => (min.inf(&point), max.sup(&point)),
        });
    }

    /// Includes a box given by its center and half extents.
    pub fn include_box(&mut self, center: Point3<f64>, half_extents: Vector3<f64>) {
        let half = half_extents.abs();
        self.include_point(center - half);
        self.include_point(center + half);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extent.is_none()
    }

    #[must_use]
    pub fn min(&self) -> Option<Point3<f64>> {
        self.extent.map(|(min, _)| min)
    }

    #[must_use]
    pub fn max(&self) -> Option<Point3<f64>> {
        self.extent.map(|(_, max)| max)
    }

    #[must_use]
    pub fn center(&self) -> Option<Point3<f64>> {
        self.extent.map(|(min, max)| nalgebra::center(&min, &max))
    }

    /// Largest side length of the box.
    #[must_use]
    pub fn max_dimension(&self) -> Option<f64> {
        self.extent.map(|(min, max)| (max - min).max())
    }
}

/// Euler XYZ rotation that points a camera's local -Z at `target`, +Y up.
#[must_use]
pub fn look_at_rotation(from: Point3<f64>, target: Point3<f64>) -> Vector3<f64> {
    let direction = target - from;
    let horizontal = direction.x.hypot(direction.y);
    Vector3::new(
        horizontal.atan2(-direction.z),
        0.0,
        (-direction.x).atan2(direction.y),
    )
}

/// Frames `bounds` with a preset camera. `None` for no preset or empty bounds.
#[must_use]
pub fn frame_camera(bounds: &Bounds3, preset: CameraPreset, y_offset: f64) -> Option<CameraSpec> {
    let center = bounds.center()?;
    let size = bounds.max_dimension()?;
    let distance = size * CAMERA_DISTANCE_FACTOR;

    let (location, rotation) = match preset {
        CameraPreset::None => return None,
        CameraPreset::Front => (
            Point3::new(center.x, center.y - distance + y_offset, center.z),
            Vector3::new(FRAC_PI_2, 0.0, 0.0),
        ),
        CameraPreset::Top => (
            Point3::new(center.x, center.y + y_offset, center.z + distance),
            Vector3::zeros(),
        ),
        CameraPreset::Isometric => {
            let location = Point3::new(
                center.x + distance,
                center.y - distance + y_offset,
                center.z + distance,
            );
            let target = Point3::new(center.x, center.y + y_offset, center.z);
            (location, look_at_rotation(location, target))
        }
    };

    Some(CameraSpec {
        name: "CSV_Viz_Camera".to_owned(),
        location,
        rotation,
        clip_end: Some(size * CLIP_END_FACTOR),
    })
}

/// Light for a plot lighting preset.
#[must_use]
pub fn preset_light(preset: LightingPreset, y_offset: f64) -> Option<LightSpec> {
    match preset {
        LightingPreset::None => None,
        LightingPreset::Sun => Some(LightSpec {
            name: "CSV_Viz_Sun".to_owned(),
            kind: LightKind::Sun,
            location: Point3::new(5.0, -5.0 + y_offset, 10.0),
            rotation: Vector3::zeros(),
            energy: 5.0,
        }),
        LightingPreset::Point => Some(LightSpec {
            name: "CSV_Viz_Point".to_owned(),
            kind: LightKind::Point,
            location: Point3::new(0.0, y_offset, 5.0),
            rotation: Vector3::zeros(),
            energy: 1000.0,
        }),
    }
}

/// Pie camera: in front of and above the origin, looking at it.
#[must_use]
pub fn pie_camera(distance: f64) -> CameraSpec {
    let location = Point3::new(0.0, -distance, distance * 0.75);
    CameraSpec {
        name: "PieChartCam".to_owned(),
        location,
        rotation: look_at_rotation(location, Point3::origin()),
        clip_end: None,
    }
}

#[must_use]
pub fn pie_light(energy: f64) -> LightSpec {
    let angle = 45f64.to_radians();
    LightSpec {
        name: "PieChartLight".to_owned(),
        kind: LightKind::Sun,
        location: Point3::new(5.0, -5.0, 10.0),
        rotation: Vector3::new(angle, 0.0, angle),
        energy,
    }
}

/// World background for pie scenes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Background {
    pub color: Color,
    pub strength: f64,
}
