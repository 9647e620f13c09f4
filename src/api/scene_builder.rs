//! Assembles geometry and the animation timeline into one [`SceneFrame`].
//!
//! Everything here is pure: the frame is complete before any adapter call.

use std::f64::consts::FRAC_PI_2;

use nalgebra::{Point3, Vector3};
use tracing::debug;

use crate::core::classifier::{RoleAssignment, assign_roles, classify_table};
use crate::core::color::{self, Color};
use crate::core::framing::{self, Background, Bounds3};
use crate::core::geometry::{TextAlign, Transform};
use crate::core::loader::{CsvTable, load_label_value};
use crate::core::pie::{self, SliceLayout, WedgeSpec};
use crate::core::plot::{self, LABEL_COLOR, PlotLayout};
use crate::core::timeline::{self, EasingKind, Timeline};
use crate::core::types::{Frame, RowWarning};
use crate::error::{ChartError, ChartResult};
use crate::scene::{
    AnimatedProperty, Keyframe, ObjectBody, ObjectId, SceneFrame, SceneObject, TextSpec,
};

use super::{
    AnimationConfig, PIE_NAMESPACE, PLOT_NAMESPACE, PieColorScheme, PieOptions, PlotOptions,
};

/// Output of one scene assembly.
#[derive(Debug)]
pub(super) struct AssembledScene {
    pub frame: SceneFrame,
    pub timeline: Timeline,
    pub warnings: Vec<RowWarning>,
    pub roles: Option<RoleAssignment>,
}

/// One animated chart item: its object plus an optional label that follows
/// its creation stage.
struct AnimatedItem {
    object: ObjectId,
    label: Option<ObjectId>,
    /// Location before the explode offset is applied.
    rest_location: Point3<f64>,
}

pub(super) fn assemble_pie(
    table: &CsvTable,
    options: &PieOptions,
    animation: &AnimationConfig,
) -> ChartResult<AssembledScene> {
    let roles = resolve_pie_columns(table, options);
    let (Some(label_column), Some(value_column)) = (&roles.label, &roles.value) else {
        return Err(ChartError::MissingRole(if roles.value.is_none() {
            "value"
        } else {
            "label"
        }));
    };

    let report = load_label_value(table, label_column, value_column)?;
    let mut items = report.items;
    options.sort.apply(&mut items);
    let slices = pie::layout_slices(&items)?;

    let mut frame = SceneFrame::new(PIE_NAMESPACE);
    let root = frame.push_object(SceneObject::new(
        format!("{PIE_NAMESPACE}_Root"),
        ObjectBody::Empty,
        Transform::default(),
    ));

    let explode = options.explode_factor > 0.0;
    let mut animated = Vec::with_capacity(slices.len());
    for slice in &slices {
        let mesh = pie::build_wedge(WedgeSpec::for_slice(
            slice,
            options.radius,
            options.height,
            options.subdivisions,
        ))?;
        let location = if explode {
            pie::explode_offset(slice, options.radius, options.explode_factor)
        } else {
            Point3::origin()
        };
        let object = frame.push_object(
            SceneObject::new(
                format!("PieSlice_{}", slice.label.replace(' ', "_")),
                ObjectBody::Mesh(mesh),
                Transform::at(location),
            )
            .with_color(Some(slice_color(slice, options.colors)))
            .with_parent(Some(root)),
        );

        let label = frame.push_object(pie_label(slice, options, root));
        animated.push(AnimatedItem {
            object,
            label: Some(label),
            rest_location: Point3::origin(),
        });
    }

    let timeline = timeline::schedule(animated.len(), &animation.schedule_spec(explode))?;
    apply_animation(&mut frame, &animated, root, &timeline, animation);

    frame
        .cameras
        .push(framing::pie_camera(options.scene.camera_distance));
    frame
        .lights
        .push(framing::pie_light(options.scene.light_power));
    frame.background = Some(Background {
        color: options.scene.background,
        strength: 1.0,
    });

    debug!(
        slices = slices.len(),
        skipped = report.warnings.len(),
        animated = timeline.is_animated(),
        "assembled pie scene"
    );

    Ok(AssembledScene {
        frame,
        timeline,
        warnings: report.warnings,
        roles: Some(roles),
    })
}

pub(super) fn assemble_plot(
    table: &CsvTable,
    options: &PlotOptions,
    animation: &AnimationConfig,
) -> ChartResult<AssembledScene> {
    let resolved = options.resolved();
    let layout = plot::build_plot(table, &resolved.plot_spec())?;

    let mut frame = SceneFrame::new(PLOT_NAMESPACE);
    let root = frame.push_object(SceneObject::new(
        format!("{PLOT_NAMESPACE}_Root"),
        ObjectBody::Empty,
        Transform::default(),
    ));

    let mut bounds = Bounds3::new();
    let mut animated = Vec::with_capacity(layout.primitives.len());
    for primitive in &layout.primitives {
        bounds.include_box(primitive.transform.location, primitive.transform.scale / 2.0);
        let object = frame.push_object(
            SceneObject::new(
                primitive.name.clone(),
                ObjectBody::Primitive(primitive.kind),
                primitive.transform,
            )
            .with_color(primitive.color)
            .with_parent(Some(root)),
        );
        animated.push(AnimatedItem {
            object,
            label: None,
            rest_location: primitive.transform.location,
        });
    }

    push_plot_decorations(&mut frame, &layout, root, &mut bounds);

    let timeline = timeline::schedule(animated.len(), &animation.schedule_spec(false))?;
    apply_animation(&mut frame, &animated, root, &timeline, animation);

    if let Some(camera) = framing::frame_camera(&bounds, resolved.camera, resolved.y_offset) {
        frame.cameras.push(camera);
    }
    if let Some(light) = framing::preset_light(resolved.lighting, resolved.y_offset) {
        frame.lights.push(light);
    }

    debug!(
        primitives = layout.primitives.len(),
        labels = layout.labels.len(),
        skipped = layout.warnings.len(),
        color_mapped = layout.color_range.is_some(),
        "assembled plot scene"
    );

    Ok(AssembledScene {
        frame,
        timeline,
        warnings: layout.warnings,
        roles: None,
    })
}

/// Configured columns win; missing ones come from the column classifier.
fn resolve_pie_columns(table: &CsvTable, options: &PieOptions) -> RoleAssignment {
    if let (Some(label), Some(value)) = (&options.label_column, &options.value_column) {
        return RoleAssignment {
            label: Some(label.clone()),
            value: Some(value.clone()),
        };
    }

    let detected = assign_roles(&classify_table(table));
    RoleAssignment {
        label: options.label_column.clone().or(detected.label),
        value: options.value_column.clone().or(detected.value),
    }
}

fn slice_color(slice: &SliceLayout, scheme: PieColorScheme) -> Color {
    match scheme {
        PieColorScheme::IndexPalette => color::index_palette(slice.index),
        PieColorScheme::Alternating { a, b } => color::alternating(slice.index, a, b),
    }
}

fn pie_label(slice: &SliceLayout, options: &PieOptions, root: ObjectId) -> SceneObject {
    let (location, rotation) = pie::label_anchor(
        slice,
        options.radius,
        options.height,
        options.text_offset,
        options.label_orientation,
    );
    SceneObject::new(
        format!("PieLabel_{}", slice.label.replace(' ', "_")),
        ObjectBody::Text(TextSpec {
            body: slice.label_text(),
            size: options.text_size,
            align: TextAlign::Center,
        }),
        Transform::at(location).with_rotation(rotation),
    )
    .with_parent(Some(root))
}

fn push_plot_decorations(
    frame: &mut SceneFrame,
    layout: &PlotLayout,
    root: ObjectId,
    bounds: &mut Bounds3,
) {
    for label in &layout.labels {
        bounds.include_point(label.location);
        frame.push_object(
            SceneObject::new(
                format!("CSV_Label_{}", label.text),
                ObjectBody::Text(TextSpec {
                    body: label.text.clone(),
                    size: label.size,
                    align: TextAlign::Center,
                }),
                Transform::at(label.location).with_rotation(Vector3::new(FRAC_PI_2, 0.0, 0.0)),
            )
            .with_color(Some(LABEL_COLOR))
            .with_parent(Some(root)),
        );
    }

    if let Some(axis) = &layout.axis_line {
        for vertex in &axis.mesh.vertices {
            bounds.include_point(axis.location + vertex.coords);
        }
        frame.push_object(
            SceneObject::new(
                "X_Axis_Line",
                ObjectBody::Mesh(axis.mesh.clone()),
                Transform::at(axis.location),
            )
            .with_parent(Some(root)),
        );
    }
}

/// Turns timeline spans into keyframes and sets the required playback end.
///
/// Items without an explode span keep their final location as a static
/// placement; no location keyframes are emitted for them.
fn apply_animation(
    frame: &mut SceneFrame,
    items: &[AnimatedItem],
    root: ObjectId,
    timeline: &Timeline,
    animation: &AnimationConfig,
) {
    let easing = animation.easing;
    for (item, schedule) in items.iter().zip(&timeline.items) {
        if let Some(span) = schedule.creation {
            for target in std::iter::once(item.object).chain(item.label) {
                let final_scale = frame.objects[target.0].transform.scale;
                push_pair(
                    frame,
                    target,
                    AnimatedProperty::Scale,
                    (span.start, Vector3::zeros()),
                    (span.end, final_scale),
                    easing,
                );
            }
        }
        if let Some(span) = schedule.explode {
            let exploded = frame.objects[item.object.0].transform.location;
            push_pair(
                frame,
                item.object,
                AnimatedProperty::Location,
                (span.start, item.rest_location.coords),
                (span.end, exploded.coords),
                easing,
            );
        }
    }

    if let Some(span) = timeline.rotation {
        push_pair(
            frame,
            root,
            AnimatedProperty::Rotation,
            (span.start, Vector3::zeros()),
            (span.end, Vector3::new(0.0, 0.0, animation.rotation.total_angle())),
            EasingKind::Linear,
        );
    }

    frame.timeline_end = timeline.required_end_frame();
}

fn push_pair(
    frame: &mut SceneFrame,
    target: ObjectId,
    property: AnimatedProperty,
    from: (Frame, Vector3<f64>),
    to: (Frame, Vector3<f64>),
    easing: EasingKind,
) {
    frame
        .keyframes
        .push(Keyframe::new(target, property, from.0, from.1, easing));
    frame
        .keyframes
        .push(Keyframe::new(target, property, to.0, to.1, easing));
}
