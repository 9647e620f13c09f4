use nalgebra::Point3;

use crate::core::framing::{Background, CameraSpec, LightSpec};
use crate::core::geometry::{MeshGeometry, PrimitiveKind, Transform};
use crate::core::{Color, Frame};
use crate::error::{ChartError, ChartResult};
use crate::scene::{Keyframe, SceneAdapter, TextSpec};

/// Calls observed by [`RecordingAdapter`], in order.
#[derive(Debug, Clone, PartialEq)]
pub enum AdapterCall {
    ClearNamespace(String),
    CreateEmpty(String),
    CreateMesh { name: String, faces: usize },
    CreatePrimitive { name: String, kind: PrimitiveKind },
    CreateText { name: String, body: String },
    Place(usize),
    SetParent { child: usize, parent: usize },
    SetColor(usize),
    Keyframe(usize),
    SetTimelineEnd(Frame),
    CreateCamera(String),
    CreateLight(String),
    SetBackground,
}

/// Host-side state of one object created through the adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedObject {
    pub name: String,
    pub namespace: Option<String>,
    pub transform: Transform,
    pub color: Option<Color>,
    pub parent: Option<usize>,
    pub keyframes: Vec<Keyframe>,
}

/// In-memory host used by tests and headless planning.
///
/// It keeps enough state to answer "what would the host contain now": live
/// objects per namespace, their final transforms and keyframes, and a
/// playback end that only ever grows.
#[derive(Debug, Default)]
pub struct RecordingAdapter {
    pub calls: Vec<AdapterCall>,
    objects: Vec<Option<RecordedObject>>,
    active_namespace: Option<String>,
    pub timeline_end: Option<Frame>,
    pub cameras: Vec<CameraSpec>,
    pub lights: Vec<LightSpec>,
    pub background: Option<Background>,
}

impl RecordingAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from a host whose playback already ends at `frame`.
    #[must_use]
    pub fn with_timeline_end(mut self, frame: Frame) -> Self {
        self.timeline_end = Some(frame);
        self
    }

    /// Live objects, in creation order.
    pub fn objects(&self) -> impl Iterator<Item = &RecordedObject> {
        self.objects.iter().flatten()
    }

    #[must_use]
    pub fn object_named(&self, name: &str) -> Option<&RecordedObject> {
        self.objects().find(|object| object.name == name)
    }

    #[must_use]
    pub fn live_object_count(&self) -> usize {
        self.objects().count()
    }

    #[must_use]
    pub fn keyframe_count(&self) -> usize {
        self.objects().map(|object| object.keyframes.len()).sum()
    }

    fn spawn(&mut self, name: &str) -> usize {
        self.objects.push(Some(RecordedObject {
            name: name.to_owned(),
            namespace: self.active_namespace.clone(),
            transform: Transform::default(),
            color: None,
            parent: None,
            keyframes: Vec::new(),
        }));
        self.objects.len() - 1
    }

    fn object_mut(&mut self, handle: usize) -> ChartResult<&mut RecordedObject> {
        self.objects
            .get_mut(handle)
            .and_then(Option::as_mut)
            .ok_or_else(|| ChartError::InvalidData(format!("unknown object handle {handle}")))
    }
}

impl SceneAdapter for RecordingAdapter {
    type Handle = usize;

    fn clear_namespace(&mut self, namespace: &str) -> ChartResult<()> {
        for slot in &mut self.objects {
            if slot
                .as_ref()
                .is_some_and(|object| object.namespace.as_deref() == Some(namespace))
            {
                *slot = None;
            }
        }
        self.cameras.clear();
        self.lights.clear();
        self.active_namespace = Some(namespace.to_owned());
        self.calls.push(AdapterCall::ClearNamespace(namespace.to_owned()));
        Ok(())
    }

    fn create_empty(&mut self, name: &str) -> ChartResult<usize> {
        self.calls.push(AdapterCall::CreateEmpty(name.to_owned()));
        Ok(self.spawn(name))
    }

    fn create_mesh(&mut self, name: &str, mesh: &MeshGeometry) -> ChartResult<usize> {
        mesh.validate()?;
        self.calls.push(AdapterCall::CreateMesh {
            name: name.to_owned(),
            faces: mesh.faces.len(),
        });
        Ok(self.spawn(name))
    }

    fn create_primitive(&mut self, name: &str, kind: PrimitiveKind) -> ChartResult<usize> {
        self.calls.push(AdapterCall::CreatePrimitive {
            name: name.to_owned(),
            kind,
        });
        Ok(self.spawn(name))
    }

    fn create_text(
        &mut self,
        name: &str,
        text: &TextSpec,
        position: Point3<f64>,
    ) -> ChartResult<usize> {
        self.calls.push(AdapterCall::CreateText {
            name: name.to_owned(),
            body: text.body.clone(),
        });
        let handle = self.spawn(name);
        self.object_mut(handle)?.transform.location = position;
        Ok(handle)
    }

    fn place(&mut self, handle: &usize, transform: &Transform) -> ChartResult<()> {
        transform.validate()?;
        self.object_mut(*handle)?.transform = *transform;
        self.calls.push(AdapterCall::Place(*handle));
        Ok(())
    }

    fn set_parent(&mut self, child: &usize, parent: &usize) -> ChartResult<()> {
        self.object_mut(*parent)?;
        self.object_mut(*child)?.parent = Some(*parent);
        self.calls.push(AdapterCall::SetParent {
            child: *child,
            parent: *parent,
        });
        Ok(())
    }

    fn set_color(&mut self, handle: &usize, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.object_mut(*handle)?.color = Some(color);
        self.calls.push(AdapterCall::SetColor(*handle));
        Ok(())
    }

    fn keyframe(&mut self, handle: &usize, key: &Keyframe) -> ChartResult<()> {
        self.object_mut(*handle)?.keyframes.push(*key);
        self.calls.push(AdapterCall::Keyframe(*handle));
        Ok(())
    }

    fn set_timeline_end(&mut self, frame: Frame) -> ChartResult<()> {
        self.timeline_end = Some(self.timeline_end.map_or(frame, |end| end.max(frame)));
        self.calls.push(AdapterCall::SetTimelineEnd(frame));
        Ok(())
    }

    fn create_camera(&mut self, camera: &CameraSpec) -> ChartResult<()> {
        self.cameras.push(camera.clone());
        self.calls.push(AdapterCall::CreateCamera(camera.name.clone()));
        Ok(())
    }

    fn create_light(&mut self, light: &LightSpec) -> ChartResult<()> {
        self.lights.push(light.clone());
        self.calls.push(AdapterCall::CreateLight(light.name.clone()));
        Ok(())
    }

    fn set_background(&mut self, background: &Background) -> ChartResult<()> {
        self.background = Some(*background);
        self.calls.push(AdapterCall::SetBackground);
        Ok(())
    }
}
