mod frame;
mod recording_adapter;

pub use frame::{
    AnimatedProperty, Keyframe, ObjectBody, ObjectId, SceneFrame, SceneObject, TextSpec,
};
pub use recording_adapter::{AdapterCall, RecordedObject, RecordingAdapter};

use nalgebra::Point3;
use tracing::debug;

use crate::core::framing::{Background, CameraSpec, LightSpec};
use crate::core::geometry::{MeshGeometry, PrimitiveKind, Transform};
use crate::core::{Color, Frame};
use crate::error::ChartResult;

/// Contract implemented by the host application that owns persistent objects.
///
/// The crate never keeps host state between runs: it hands over a fully
/// materialized [`SceneFrame`] and drives these calls through [`apply_frame`].
pub trait SceneAdapter {
    type Handle: Clone;

    /// Discards every object previously generated under `namespace`.
    fn clear_namespace(&mut self, namespace: &str) -> ChartResult<()>;

    fn create_empty(&mut self, name: &str) -> ChartResult<Self::Handle>;

    /// Faces are ordered index loops; winding decides the outward normal.
    fn create_mesh(&mut self, name: &str, mesh: &MeshGeometry) -> ChartResult<Self::Handle>;

    fn create_primitive(&mut self, name: &str, kind: PrimitiveKind)
    -> ChartResult<Self::Handle>;

    fn create_text(
        &mut self,
        name: &str,
        text: &TextSpec,
        position: Point3<f64>,
    ) -> ChartResult<Self::Handle>;

    fn place(&mut self, handle: &Self::Handle, transform: &Transform) -> ChartResult<()>;

    fn set_parent(&mut self, child: &Self::Handle, parent: &Self::Handle) -> ChartResult<()>;

    fn set_color(&mut self, handle: &Self::Handle, color: Color) -> ChartResult<()>;

    fn keyframe(&mut self, handle: &Self::Handle, key: &Keyframe) -> ChartResult<()>;

    /// Extends the host playback range to at least `frame`; never shrinks it.
    fn set_timeline_end(&mut self, frame: Frame) -> ChartResult<()>;

    fn create_camera(&mut self, _camera: &CameraSpec) -> ChartResult<()> {
        Ok(())
    }

    fn create_light(&mut self, _light: &LightSpec) -> ChartResult<()> {
        Ok(())
    }

    fn set_background(&mut self, _background: &Background) -> ChartResult<()> {
        Ok(())
    }
}

/// Realizes `frame` through `adapter`, clearing its namespace first.
///
/// The frame is validated before the first adapter call, so an invalid frame
/// never leaves a half-built scene behind. Returns one handle per object.
pub fn apply_frame<A: SceneAdapter>(
    adapter: &mut A,
    frame: &SceneFrame,
) -> ChartResult<Vec<A::Handle>> {
    frame.validate()?;
    adapter.clear_namespace(&frame.namespace)?;

    let mut handles: Vec<A::Handle> = Vec::with_capacity(frame.objects.len());
    for object in &frame.objects {
        let handle = match &object.body {
            ObjectBody::Empty => adapter.create_empty(&object.name)?,
            ObjectBody::Mesh(mesh) => adapter.create_mesh(&object.name, mesh)?,
            ObjectBody::Primitive(kind) => adapter.create_primitive(&object.name, *kind)?,
            ObjectBody::Text(text) => {
                adapter.create_text(&object.name, text, object.transform.location)?
            }
        };
        adapter.place(&handle, &object.transform)?;
        if let Some(color) = object.color {
            adapter.set_color(&handle, color)?;
        }
        if let Some(parent) = object.parent {
            adapter.set_parent(&handle, &handles[parent.0])?;
        }
        handles.push(handle);
    }

    for camera in &frame.cameras {
        adapter.create_camera(camera)?;
    }
    for light in &frame.lights {
        adapter.create_light(light)?;
    }
    if let Some(background) = &frame.background {
        adapter.set_background(background)?;
    }

    for key in &frame.keyframes {
        adapter.keyframe(&handles[key.target.0], key)?;
    }
    if let Some(end) = frame.timeline_end {
        adapter.set_timeline_end(end)?;
    }

    debug!(
        namespace = %frame.namespace,
        objects = handles.len(),
        keyframes = frame.keyframes.len(),
        timeline_end = ?frame.timeline_end,
        "applied scene frame"
    );
    Ok(handles)
}
