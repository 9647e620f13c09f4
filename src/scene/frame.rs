use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::core::framing::{Background, CameraSpec, LightSpec};
use crate::core::geometry::{MeshGeometry, PrimitiveKind, TextAlign, Transform};
use crate::core::timeline::{EasingKind, HandleType};
use crate::core::{Color, Frame};
use crate::error::{ChartError, ChartResult};

/// Position of an object inside [`SceneFrame::objects`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub usize);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpec {
    pub body: String,
    pub size: f64,
    pub align: TextAlign,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObjectBody {
    /// Transform-only pivot.
    Empty,
    Mesh(MeshGeometry),
    Primitive(PrimitiveKind),
    Text(TextSpec),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    pub body: ObjectBody,
    /// Final (post-animation) transform.
    pub transform: Transform,
    pub color: Option<Color>,
    pub parent: Option<ObjectId>,
}

impl SceneObject {
    #[must_use]
    pub fn new(name: impl Into<String>, body: ObjectBody, transform: Transform) -> Self {
        Self {
            name: name.into(),
            body,
            transform,
            color: None,
            parent: None,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: Option<Color>) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn with_parent(mut self, parent: Option<ObjectId>) -> Self {
        self.parent = parent;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimatedProperty {
    Location,
    Rotation,
    Scale,
}

impl AnimatedProperty {
    /// Conventional host data path for the property.
    #[must_use]
    pub fn data_path(self) -> &'static str {
        match self {
            Self::Location => "location",
            Self::Rotation => "rotation_euler",
            Self::Scale => "scale",
        }
    }
}

/// One recorded sample; two samples of the same property define a segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub target: ObjectId,
    pub property: AnimatedProperty,
    pub frame: Frame,
    pub value: Vector3<f64>,
    pub easing: EasingKind,
    pub handle: HandleType,
}

impl Keyframe {
    #[must_use]
    pub fn new(
        target: ObjectId,
        property: AnimatedProperty,
        frame: Frame,
        value: Vector3<f64>,
        easing: EasingKind,
    ) -> Self {
        Self {
            target,
            property,
            frame,
            value,
            easing,
            handle: easing.handle_type(),
        }
    }
}

/// Immutable description of everything one generation pass creates.
///
/// Objects are listed parents-first so an adapter can create them in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneFrame {
    pub namespace: String,
    pub objects: Vec<SceneObject>,
    pub cameras: Vec<CameraSpec>,
    pub lights: Vec<LightSpec>,
    pub background: Option<Background>,
    pub keyframes: Vec<Keyframe>,
    /// Minimum host playback end; `None` leaves the host timeline untouched.
    pub timeline_end: Option<Frame>,
}

impl SceneFrame {
    #[must_use]
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            objects: Vec::new(),
            cameras: Vec::new(),
            lights: Vec::new(),
            background: None,
            keyframes: Vec::new(),
            timeline_end: None,
        }
    }

    pub fn push_object(&mut self, object: SceneObject) -> ObjectId {
        self.objects.push(object);
        ObjectId(self.objects.len() - 1)
    }

    #[must_use]
    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.0)
    }

    /// Keyframes targeting `id`, in recording order.
    pub fn keyframes_for(&self, id: ObjectId) -> impl Iterator<Item = &Keyframe> {
        self.keyframes.iter().filter(move |key| key.target == id)
    }

    #[must_use]
    pub fn mesh_count(&self) -> usize {
        self.objects
            .iter()
            .filter(|object| matches!(object.body, ObjectBody::Mesh(_)))
            .count()
    }

    #[must_use]
    pub fn text_count(&self) -> usize {
        self.objects
            .iter()
            .filter(|object| matches!(object.body, ObjectBody::Text(_)))
            .count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.namespace.is_empty() {
            return Err(ChartError::InvalidData(
                "scene namespace must not be empty".to_owned(),
            ));
        }

        for (index, object) in self.objects.iter().enumerate() {
            object.transform.validate()?;
            if let Some(color) = object.color {
                color.validate()?;
            }
            if object.parent.is_some_and(|parent| parent.0 >= index) {
                return Err(ChartError::InvalidData(format!(
                    "object `{}` must come after its parent",
                    object.name
                )));
            }
            match &object.body {
                ObjectBody::Mesh(mesh) => mesh.validate()?,
                ObjectBody::Text(text) if !text.size.is_finite() || text.size <= 0.0 => {
                    return Err(ChartError::InvalidData(format!(
                        "text `{}` must have a finite size > 0",
                        object.name
                    )));
                }
                _ => {}
            }
        }

        for key in &self.keyframes {
            if key.target.0 >= self.objects.len() {
                return Err(ChartError::InvalidData(format!(
                    "keyframe targets missing object {}",
                    key.target.0
                )));
            }
            if !key.value.iter().all(|c| c.is_finite()) {
                return Err(ChartError::InvalidData(
                    "keyframe values must be finite".to_owned(),
                ));
            }
        }

        if let Some(background) = self.background {
            background.color.validate()?;
        }
        Ok(())
    }
}
