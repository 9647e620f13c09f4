//! Animation scheduler: pure `(start, end)` frame computation per stage.
//!
//! Nothing here touches the host; the resulting [`Timeline`] is applied later
//! as keyframes by the scene layer.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::types::Frame;
use crate::error::{ChartError, ChartResult};

/// Frames between the last per-item stage ending and rotation starting.
pub const ROTATION_GAP_FRAMES: Frame = 10;

/// Frames appended after the last stage when extending the host timeline.
pub const TIMELINE_TAIL_FRAMES: Frame = 20;

/// Interpolation curve for creation/explode keyframes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EasingKind {
    Linear,
    #[default]
    Bezier,
    Sine,
    Quad,
    Cubic,
    Expo,
    Back,
    Bounce,
    Elastic,
}

/// Keyframe handle style chosen for a curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandleType {
    /// Straight-line handles.
    Vector,
    /// Automatic smoothing handles.
    AutoClamped,
}

impl EasingKind {
    /// `Vector` for [`EasingKind::Linear`], `AutoClamped` for every other curve.
    #[must_use]
    pub fn handle_type(self) -> HandleType {
        if self == Self::Linear {
            HandleType::Vector
        } else {
            HandleType::AutoClamped
        }
    }

    /// Evaluates the ease-in-out form of the curve at `t` in [0, 1].
    ///
    /// Every curve maps 0 to 0 and 1 to 1; `Back` and `Elastic` overshoot.
    #[must_use]
    pub fn sample(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        let in_out = |ease_in: fn(f64) -> f64| {
            if t < 0.5 {
                ease_in(2.0 * t) / 2.0
            } else {
                1.0 - ease_in(2.0 * (1.0 - t)) / 2.0
            }
        };

        match self {
            Self::Linear => t,
            Self::Bezier => t * t * (3.0 - 2.0 * t),
            Self::Sine => (1.0 - (PI * t).cos()) / 2.0,
            Self::Quad => in_out(|u| u * u),
            Self::Cubic => in_out(|u| u * u * u),
            Self::Expo => in_out(|u| if u == 0.0 { 0.0 } else { 2f64.powf(10.0 * (u - 1.0)) }),
            Self::Back => in_out(|u| {
                const OVERSHOOT: f64 = 1.701_58;
                u * u * ((OVERSHOOT + 1.0) * u - OVERSHOOT)
            }),
            Self::Bounce => in_out(|u| 1.0 - bounce_out(1.0 - u)),
            Self::Elastic => in_out(|u| {
                if u == 0.0 || u == 1.0 {
                    u
                } else {
                    -(2f64.powf(10.0 * (u - 1.0))) * ((u - 1.075) * (2.0 * PI) / 0.3).sin()
                }
            }),
        }
    }
}

fn bounce_out(t: f64) -> f64 {
    const N: f64 = 7.5625;
    const D: f64 = 2.75;
    if t < 1.0 / D {
        N * t * t
    } else if t < 2.0 / D {
        let t = t - 1.5 / D;
        N * t * t + 0.75
    } else if t < 2.5 / D {
        let t = t - 2.25 / D;
        N * t * t + 0.9375
    } else {
        let t = t - 2.625 / D;
        N * t * t + 0.984_375
    }
}

/// One per-item stage: duration, per-item stagger and a start delay, in frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageConfig {
    pub enabled: bool,
    pub duration: Frame,
    pub offset: Frame,
    #[serde(default)]
    pub delay: Frame,
}

impl StageConfig {
    #[must_use]
    pub fn enabled(duration: Frame, offset: Frame) -> Self {
        Self {
            enabled: true,
            duration,
            offset,
            delay: 0,
        }
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::enabled(30, 5)
        }
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Frame) -> Self {
        self.delay = delay;
        self
    }
}

/// Whole-chart spin after every per-item stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationConfig {
    pub enabled: bool,
    pub loops: f64,
    pub degrees_per_frame: f64,
    #[serde(default)]
    pub delay: Frame,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            loops: 1.0,
            degrees_per_frame: 2.0,
            delay: 0,
        }
    }
}

impl RotationConfig {
    #[must_use]
    pub fn enabled(loops: f64, degrees_per_frame: f64) -> Self {
        Self {
            enabled: true,
            loops,
            degrees_per_frame,
            delay: 0,
        }
    }

    /// `|loops * 360 / degrees_per_frame|` rounded to frames, at least one.
    ///
    /// Spins too slow to fit a [`Frame`] saturate; [`schedule`] rejects them.
    #[must_use]
    pub fn duration(&self) -> Frame {
        if self.degrees_per_frame == 0.0 || !self.degrees_per_frame.is_finite() {
            return 1;
        }
        ((self.loops * 360.0 / self.degrees_per_frame).abs().round() as Frame).max(1)
    }

    /// Total signed spin in radians; the sign follows the rotation speed.
    #[must_use]
    pub fn total_angle(&self) -> f64 {
        let direction = if self.degrees_per_frame < 0.0 { -1.0 } else { 1.0 };
        self.loops.abs() * 2.0 * PI * direction
    }
}

/// Inputs of one scheduling pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSpec {
    pub start_frame: Frame,
    pub creation: StageConfig,
    pub explode: StageConfig,
    pub rotation: RotationConfig,
    /// Explode spans are only produced when this is true (factor > 0, pie).
    pub explode_applicable: bool,
}

/// Frame range of one stage; `end = start + duration`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageSpan {
    pub start: Frame,
    pub end: Frame,
}

impl StageSpan {
    /// `None` when the end frame does not fit a [`Frame`].
    #[must_use]
    pub fn new(start: Frame, duration: Frame) -> Option<Self> {
        Some(Self {
            start,
            end: start.checked_add(duration)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSchedule {
    pub index: usize,
    pub creation: Option<StageSpan>,
    pub explode: Option<StageSpan>,
}

/// Frame ranges for every item and stage of one generation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    pub items: Vec<ItemSchedule>,
    pub rotation: Option<StageSpan>,
    /// Latest end frame over all enabled stages; `None` when nothing animates.
    pub max_end_frame: Option<Frame>,
}

impl Timeline {
    /// Minimum host playback end, tail included.
    #[must_use]
    pub fn required_end_frame(&self) -> Option<Frame> {
        self.max_end_frame
            .map(|end| end.saturating_add(TIMELINE_TAIL_FRAMES))
    }

    #[must_use]
    pub fn is_animated(&self) -> bool {
        self.max_end_frame.is_some()
    }
}

/// Computes the timeline for `item_count` items in render order.
///
/// Fails with [`ChartError::InvalidConfig`] when a frame, tail included, would
/// not fit a [`Frame`].
pub fn schedule(item_count: usize, spec: &ScheduleSpec) -> ChartResult<Timeline> {
    let t0 = spec.start_frame;
    let explode_enabled = spec.explode.enabled && spec.explode_applicable;

    let items = (0..item_count)
        .map(|index| {
            let creation = if spec.creation.enabled {
                Some(stage_span(t0, &spec.creation, index, "creation")?)
            } else {
                None
            };
            let explode = if explode_enabled {
                let anchor = creation.map_or(t0, |span| span.end);
                Some(stage_span(anchor, &spec.explode, index, "explode")?)
            } else {
                None
            };
            Ok(ItemSchedule {
                index,
                creation,
                explode,
            })
        })
        .collect::<ChartResult<Vec<_>>>()?;

    let item_end = items
        .iter()
        .flat_map(|item| item.creation.into_iter().chain(item.explode))
        .map(|span| span.end)
        .max();

    let rotation = if spec.rotation.enabled {
        let start = match item_end {
            Some(end) => end.checked_add(ROTATION_GAP_FRAMES),
            None => Some(t0),
        };
        let span = start
            .and_then(|start| start.checked_add(spec.rotation.delay))
            .and_then(|start| StageSpan::new(start, spec.rotation.duration()))
            .ok_or_else(|| frame_overflow("rotation"))?;
        Some(span)
    } else {
        None
    };

    let max_end_frame = item_end.into_iter().chain(rotation.map(|span| span.end)).max();
    if max_end_frame.is_some_and(|end| end.checked_add(TIMELINE_TAIL_FRAMES).is_none()) {
        return Err(frame_overflow("timeline tail"));
    }

    debug!(
        item_count,
        ?rotation,
        ?max_end_frame,
        "scheduled animation timeline"
    );

    Ok(Timeline {
        items,
        rotation,
        max_end_frame,
    })
}

/// `anchor + delay + index * offset`, lasting `duration`.
fn stage_span(
    anchor: Frame,
    stage: &StageConfig,
    index: usize,
    name: &'static str,
) -> ChartResult<StageSpan> {
    Frame::try_from(index)
        .ok()
        .and_then(|stagger| stagger.checked_mul(stage.offset))
        .and_then(|stagger| anchor.checked_add(stage.delay)?.checked_add(stagger))
        .and_then(|start| StageSpan::new(start, stage.duration))
        .ok_or_else(|| frame_overflow(name))
}

fn frame_overflow(stage: &str) -> ChartError {
    ChartError::InvalidConfig(format!(
        "{stage} frames exceed the representable frame range"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounce_out_reaches_one() {
        assert!((bounce_out(1.0) - 1.0).abs() <= 1e-9);
        assert_eq!(bounce_out(0.0), 0.0);
    }
}
