use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{ChartError, ChartResult};

/// Ordered vertex-index loop of one face. Quads stay inline.
pub type FaceLoop = SmallVec<[usize; 4]>;

/// Vertex/face description handed to the host as-is.
///
/// Faces are ordered loops; winding decides the outward normal.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MeshGeometry {
    pub vertices: Vec<Point3<f64>>,
    pub edges: Vec<[usize; 2]>,
    pub faces: Vec<FaceLoop>,
}

impl MeshGeometry {
    #[must_use]
    pub fn with_capacity(vertices: usize, faces: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            edges: Vec::new(),
            faces: Vec::with_capacity(faces),
        }
    }

    /// Appends a vertex and returns its index.
    pub fn push_vertex(&mut self, vertex: Point3<f64>) -> usize {
        self.vertices.push(vertex);
        self.vertices.len() - 1
    }

    pub fn push_face<I>(&mut self, face: I)
    where
        I: IntoIterator<Item = usize>,
    {
        self.faces.push(face.into_iter().collect());
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self
            .vertices
            .iter()
            .any(|vertex| !vertex.iter().all(|c| c.is_finite()))
        {
            return Err(ChartError::InvalidData(
                "mesh vertices must be finite".to_owned(),
            ));
        }

        let count = self.vertices.len();
        for face in &self.faces {
            if face.len() < 3 {
                return Err(ChartError::InvalidData(
                    "mesh faces need at least 3 vertices".to_owned(),
                ));
            }
            if face.iter().any(|&index| index >= count) {
                return Err(ChartError::InvalidData(format!(
                    "mesh face references a vertex past {count}"
                )));
            }
        }
        if self.edges.iter().flatten().any(|&index| index >= count) {
            return Err(ChartError::InvalidData(format!(
                "mesh edge references a vertex past {count}"
            )));
        }
        Ok(())
    }
}

/// Location, Euler XYZ rotation in radians, and per-axis scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub location: Point3<f64>,
    pub rotation: Vector3<f64>,
    pub scale: Vector3<f64>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::at(Point3::origin())
    }
}

impl Transform {
    #[must_use]
    pub fn at(location: Point3<f64>) -> Self {
        Self {
            location,
            rotation: Vector3::zeros(),
            scale: Vector3::repeat(1.0),
        }
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation: Vector3<f64>) -> Self {
        self.rotation = rotation;
        self
    }

    #[must_use]
    pub fn with_scale(mut self, scale: Vector3<f64>) -> Self {
        self.scale = scale;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        let finite = self
            .location
            .iter()
            .chain(self.rotation.iter())
            .chain(self.scale.iter())
            .all(|c| c.is_finite());
        if finite {
            Ok(())
        } else {
            Err(ChartError::InvalidData(
                "transform components must be finite".to_owned(),
            ))
        }
    }
}

/// Host-provided unit primitives. Every kind fits a 1×1×1 box at scale 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrimitiveKind {
    Cube,
    Sphere,
    Cone,
    Cylinder,
}

impl PrimitiveKind {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Cube => "CUBE",
            Self::Sphere => "SPHERE",
            Self::Cone => "CONE",
            Self::Cylinder => "CYLINDER",
        }
    }
}

/// Horizontal text alignment relative to the text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}
