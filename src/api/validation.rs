use tracing::debug;

use crate::core::color::Color;
use crate::core::plot::AxisSpec;
use crate::core::timeline::{RotationConfig, StageConfig};
use crate::error::{ChartError, ChartResult};

use super::{AnimationConfig, ChartConfig, ChartKind, PieColorScheme, PieOptions, PlotOptions};

/// Accepted wedge subdivision range; values outside are clamped.
pub const MIN_SUBDIVISIONS: usize = 4;
pub const MAX_SUBDIVISIONS: usize = 128;

/// Validates `config` and returns the normalized copy used for the run.
pub(super) fn validate_chart_config(config: &ChartConfig) -> ChartResult<ChartConfig> {
    let mut config = config.clone();
    match &mut config.chart {
        ChartKind::Pie(options) => validate_pie_options(options)?,
        ChartKind::Plot(options) => validate_plot_options(options)?,
    }
    validate_animation_config(&config.animation)?;
    Ok(config)
}

fn validate_pie_options(options: &mut PieOptions) -> ChartResult<()> {
    for (name, column) in [
        ("label_column", &options.label_column),
        ("value_column", &options.value_column),
    ] {
        if column.as_deref().is_some_and(|column| column.trim().is_empty()) {
            return Err(ChartError::InvalidConfig(format!(
                "pie {name} must not be blank"
            )));
        }
    }

    ensure_at_least("pie radius", options.radius, 0.1)?;
    ensure_at_least("pie height", options.height, 0.01)?;
    ensure_positive("pie text_size", options.text_size)?;
    ensure_at_least("pie text_offset", options.text_offset, 0.0)?;
    if !options.explode_factor.is_finite() || !(0.0..=1.0).contains(&options.explode_factor) {
        return Err(ChartError::InvalidConfig(
            "pie explode_factor must be within [0, 1]".to_owned(),
        ));
    }

    let clamped = options.subdivisions.clamp(MIN_SUBDIVISIONS, MAX_SUBDIVISIONS);
    if clamped != options.subdivisions {
        debug!(
            requested = options.subdivisions,
            clamped, "clamped pie subdivisions"
        );
        options.subdivisions = clamped;
    }

    if let PieColorScheme::Alternating { a, b } = options.colors {
        ensure_color("pie alternating color a", a)?;
        ensure_color("pie alternating color b", b)?;
    }

    ensure_at_least("pie camera_distance", options.scene.camera_distance, 1.0)?;
    ensure_positive("pie light_power", options.scene.light_power)?;
    ensure_color("pie background", options.scene.background)
}

fn validate_plot_options(options: &PlotOptions) -> ChartResult<()> {
    for (name, axis) in [("x", options.x), ("y", options.y), ("z", options.z)] {
        if let AxisSpec::Constant { value } = axis {
            if !value.is_finite() {
                return Err(ChartError::InvalidConfig(format!(
                    "plot {name} constant must be finite"
                )));
            }
        }
    }

    ensure_at_least("plot categorical_spacing", options.categorical_spacing, 0.1)?;
    ensure_at_least("plot label_size", options.label_size, 0.1)?;
    if !options.y_offset.is_finite() {
        return Err(ChartError::InvalidConfig(
            "plot y_offset must be finite".to_owned(),
        ));
    }

    ensure_color("plot gradient low", options.gradient.low)?;
    ensure_color("plot gradient high", options.gradient.high)?;
    ensure_color("plot color_a", options.color_a)?;
    ensure_color("plot color_b", options.color_b)
}

fn validate_animation_config(animation: &AnimationConfig) -> ChartResult<()> {
    validate_stage("creation", animation.creation)?;
    validate_stage("explode", animation.explode)?;
    validate_rotation(animation.rotation)
}

fn validate_stage(name: &str, stage: StageConfig) -> ChartResult<()> {
    if !stage.enabled {
        return Ok(());
    }
    if stage.duration < 1 {
        return Err(ChartError::InvalidConfig(format!(
            "{name} duration must be >= 1 frame"
        )));
    }
    if stage.offset < 0 || stage.delay < 0 {
        return Err(ChartError::InvalidConfig(format!(
            "{name} offset and delay must be >= 0"
        )));
    }
    Ok(())
}

fn validate_rotation(rotation: RotationConfig) -> ChartResult<()> {
    if !rotation.enabled {
        return Ok(());
    }
    if !rotation.loops.is_finite() || rotation.loops <= 0.0 {
        return Err(ChartError::InvalidConfig(
            "rotation loops must be finite and > 0".to_owned(),
        ));
    }
    // zero speed is clamped to a one-frame spin by the scheduler
    if !rotation.degrees_per_frame.is_finite() {
        return Err(ChartError::InvalidConfig(
            "rotation degrees_per_frame must be finite".to_owned(),
        ));
    }
    if rotation.delay < 0 {
        return Err(ChartError::InvalidConfig(
            "rotation delay must be >= 0".to_owned(),
        ));
    }
    Ok(())
}

fn ensure_at_least(name: &str, value: f64, min: f64) -> ChartResult<()> {
    if !value.is_finite() || value < min {
        return Err(ChartError::InvalidConfig(format!(
            "{name} must be finite and >= {min}"
        )));
    }
    Ok(())
}

fn ensure_positive(name: &str, value: f64) -> ChartResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ChartError::InvalidConfig(format!(
            "{name} must be finite and > 0"
        )));
    }
    Ok(())
}

fn ensure_color(name: &str, color: Color) -> ChartResult<()> {
    color
        .validate()
        .map_err(|e| ChartError::InvalidConfig(format!("{name}: {e}")))
}
