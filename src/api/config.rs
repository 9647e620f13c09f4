use serde::{Deserialize, Serialize};

use crate::core::color::{Color, ColorGradient};
use crate::core::framing::{CameraPreset, LightingPreset};
use crate::core::geometry::PrimitiveKind;
use crate::core::pie::{LabelOrientation, SortPolicy};
use crate::core::plot::{AxisSpec, PlotSpec};
use crate::core::timeline::{EasingKind, RotationConfig, ScheduleSpec, StageConfig};
use crate::core::Frame;
use crate::error::{ChartError, ChartResult};

/// Namespace owning every object of a pie chart run.
pub const PIE_NAMESPACE: &str = "CSV_Pie_Chart";

/// Namespace owning every object of a bar/scatter run.
pub const PLOT_NAMESPACE: &str = "CSV_Viz";

/// Single explicit configuration for one generation run.
///
/// Validated once by [`crate::api::ChartGenerator::new`]; the pass never reads
/// it again afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub chart: ChartKind,
    #[serde(default)]
    pub animation: AnimationConfig,
}

impl ChartConfig {
    #[must_use]
    pub fn pie(options: PieOptions) -> Self {
        Self {
            chart: ChartKind::Pie(options),
            animation: AnimationConfig::default(),
        }
    }

    #[must_use]
    pub fn plot(options: PlotOptions) -> Self {
        Self {
            chart: ChartKind::Plot(options),
            animation: AnimationConfig::default(),
        }
    }

    #[must_use]
    pub fn with_animation(mut self, animation: AnimationConfig) -> Self {
        self.animation = animation;
        self
    }

    /// Namespace cleared before this chart is built.
    #[must_use]
    pub fn namespace(&self) -> &'static str {
        match self.chart {
            ChartKind::Pie(_) => PIE_NAMESPACE,
            ChartKind::Plot(_) => PLOT_NAMESPACE,
        }
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse chart config: {e}")))
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize chart config: {e}"))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartKind {
    Pie(PieOptions),
    Plot(PlotOptions),
}

/// Slice coloring for pie charts.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "scheme", rename_all = "snake_case")]
pub enum PieColorScheme {
    /// Reproducible color derived from the slice index.
    #[default]
    IndexPalette,
    Alternating { a: Color, b: Color },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PieSceneOptions {
    #[serde(default = "default_camera_distance")]
    pub camera_distance: f64,
    #[serde(default = "default_light_power")]
    pub light_power: f64,
    #[serde(default = "default_background")]
    pub background: Color,
}

impl Default for PieSceneOptions {
    fn default() -> Self {
        Self {
            camera_distance: default_camera_distance(),
            light_power: default_light_power(),
            background: default_background(),
        }
    }
}

/// Pie chart options. `None` columns are picked by the column classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieOptions {
    #[serde(default)]
    pub label_column: Option<String>,
    #[serde(default)]
    pub value_column: Option<String>,
    #[serde(default = "default_pie_radius")]
    pub radius: f64,
    #[serde(default = "default_pie_height")]
    pub height: f64,
    #[serde(default)]
    pub explode_factor: f64,
    #[serde(default = "default_text_size")]
    pub text_size: f64,
    #[serde(default = "default_text_offset")]
    pub text_offset: f64,
    #[serde(default = "default_subdivisions")]
    pub subdivisions: usize,
    #[serde(default)]
    pub label_orientation: LabelOrientation,
    #[serde(default)]
    pub sort: SortPolicy,
    #[serde(default)]
    pub colors: PieColorScheme,
    #[serde(default)]
    pub scene: PieSceneOptions,
}

impl Default for PieOptions {
    fn default() -> Self {
        Self {
            label_column: None,
            value_column: None,
            radius: default_pie_radius(),
            height: default_pie_height(),
            explode_factor: 0.0,
            text_size: default_text_size(),
            text_offset: default_text_offset(),
            subdivisions: default_subdivisions(),
            label_orientation: LabelOrientation::default(),
            sort: SortPolicy::default(),
            colors: PieColorScheme::default(),
            scene: PieSceneOptions::default(),
        }
    }
}

impl PieOptions {
    #[must_use]
    pub fn with_columns(
        mut self,
        label_column: impl Into<String>,
        value_column: impl Into<String>,
    ) -> Self {
        self.label_column = Some(label_column.into());
        self.value_column = Some(value_column.into());
        self
    }

    #[must_use]
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    #[must_use]
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_explode_factor(mut self, factor: f64) -> Self {
        self.explode_factor = factor;
        self
    }

    #[must_use]
    pub fn with_subdivisions(mut self, subdivisions: usize) -> Self {
        self.subdivisions = subdivisions;
        self
    }

    #[must_use]
    pub fn with_label_orientation(mut self, orientation: LabelOrientation) -> Self {
        self.label_orientation = orientation;
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort: SortPolicy) -> Self {
        self.sort = sort;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, colors: PieColorScheme) -> Self {
        self.colors = colors;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlotPreset {
    #[default]
    Custom,
    BarChart,
    Scatter3d,
}

/// Bar/scatter options. Columns are 0-based indices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotOptions {
    #[serde(default)]
    pub preset: PlotPreset,
    pub x: AxisSpec,
    pub y: AxisSpec,
    pub z: AxisSpec,
    #[serde(default)]
    pub scale_column: Option<usize>,
    #[serde(default = "default_primitive")]
    pub primitive: PrimitiveKind,
    #[serde(default)]
    pub color_column: Option<usize>,
    #[serde(default)]
    pub gradient: ColorGradient,
    #[serde(default)]
    pub alternating_colors: bool,
    #[serde(default = "default_color_a")]
    pub color_a: Color,
    #[serde(default = "default_color_b")]
    pub color_b: Color,
    #[serde(default = "default_categorical_spacing")]
    pub categorical_spacing: f64,
    #[serde(default)]
    pub labels: bool,
    #[serde(default = "default_label_size")]
    pub label_size: f64,
    #[serde(default)]
    pub axis_line: bool,
    #[serde(default)]
    pub y_offset: f64,
    #[serde(default)]
    pub camera: CameraPreset,
    #[serde(default)]
    pub lighting: LightingPreset,
}

impl PlotOptions {
    /// Custom plot with the given axes and every other option at its default.
    #[must_use]
    pub fn new(x: AxisSpec, y: AxisSpec, z: AxisSpec) -> Self {
        Self {
            preset: PlotPreset::Custom,
            x,
            y,
            z,
            scale_column: None,
            primitive: default_primitive(),
            color_column: None,
            gradient: ColorGradient::default(),
            alternating_colors: false,
            color_a: default_color_a(),
            color_b: default_color_b(),
            categorical_spacing: default_categorical_spacing(),
            labels: false,
            label_size: default_label_size(),
            axis_line: false,
            y_offset: 0.0,
            camera: CameraPreset::None,
            lighting: LightingPreset::None,
        }
    }

    /// Categorical bars: one cube per row at the label's category slot, as
    /// tall as the value.
    #[must_use]
    pub fn bar_chart(label_column: usize, value_column: usize) -> Self {
        Self {
            preset: PlotPreset::BarChart,
            scale_column: Some(value_column),
            ..Self::new(
                AxisSpec::Categorical {
                    column: label_column,
                },
                AxisSpec::Constant { value: 0.0 },
                AxisSpec::Constant { value: 0.0 },
            )
        }
        .resolved()
    }

    #[must_use]
    pub fn scatter_3d(x_column: usize, y_column: usize, z_column: usize) -> Self {
        Self {
            preset: PlotPreset::Scatter3d,
            ..Self::new(
                AxisSpec::Numeric { column: x_column },
                AxisSpec::Numeric { column: y_column },
                AxisSpec::Numeric { column: z_column },
            )
        }
        .resolved()
    }

    #[must_use]
    pub fn with_color_column(mut self, column: Option<usize>) -> Self {
        self.color_column = column;
        self
    }

    #[must_use]
    pub fn with_scale_column(mut self, column: Option<usize>) -> Self {
        self.scale_column = column;
        self
    }

    #[must_use]
    pub fn with_primitive(mut self, primitive: PrimitiveKind) -> Self {
        self.primitive = primitive;
        self
    }

    #[must_use]
    pub fn with_alternating_colors(mut self, a: Color, b: Color) -> Self {
        self.alternating_colors = true;
        self.color_a = a;
        self.color_b = b;
        self
    }

    #[must_use]
    pub fn with_categorical_spacing(mut self, spacing: f64) -> Self {
        self.categorical_spacing = spacing;
        self
    }

    #[must_use]
    pub fn with_y_offset(mut self, y_offset: f64) -> Self {
        self.y_offset = y_offset;
        self
    }

    #[must_use]
    pub fn with_camera(mut self, camera: CameraPreset) -> Self {
        self.camera = camera;
        self
    }

    #[must_use]
    pub fn with_lighting(mut self, lighting: LightingPreset) -> Self {
        self.lighting = lighting;
        self
    }

    /// Applies the overrides of `preset`; `Custom` is returned unchanged.
    ///
    /// Data columns already chosen for the axes are kept, only their kind is
    /// forced. A bar chart without a scale column takes its bar height from
    /// the Y column before Y is flattened.
    #[must_use]
    pub fn resolved(&self) -> Self {
        let mut options = self.clone();
        match self.preset {
            PlotPreset::Custom => {}
            PlotPreset::BarChart => {
                if let Some(column) = options.x.column() {
                    options.x = AxisSpec::Categorical { column };
                }
                options.scale_column = options.scale_column.or(options.y.column());
                options.y = AxisSpec::Constant { value: 0.0 };
                options.z = AxisSpec::Constant { value: 0.0 };
                options.primitive = PrimitiveKind::Cube;
                options.alternating_colors = options.color_column.is_none();
                options.labels = true;
                options.axis_line = true;
                options.y_offset = 0.0;
                options.camera = CameraPreset::Front;
                options.lighting = LightingPreset::Sun;
            }
            PlotPreset::Scatter3d => {
                for axis in [&mut options.x, &mut options.y, &mut options.z] {
                    if let Some(column) = axis.column() {
                        *axis = AxisSpec::Numeric { column };
                    }
                }
                options.primitive = PrimitiveKind::Sphere;
                options.alternating_colors = false;
                options.labels = false;
                options.axis_line = false;
                options.camera = CameraPreset::Isometric;
                options.lighting = LightingPreset::Point;
            }
        }
        options
    }

    /// Geometry parameters after the preset is applied.
    #[must_use]
    pub fn plot_spec(&self) -> PlotSpec {
        let options = self.resolved();
        PlotSpec {
            x: options.x,
            y: options.y,
            z: options.z,
            scale_column: options.scale_column,
            primitive: options.primitive,
            color_column: options.color_column,
            gradient: options.gradient,
            alternating: options
                .alternating_colors
                .then_some((options.color_a, options.color_b)),
            categorical_spacing: options.categorical_spacing,
            y_offset: options.y_offset,
            labels: options.labels,
            label_size: options.label_size,
            axis_line: options.axis_line,
        }
    }
}

/// Animation stages; everything is disabled by default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    #[serde(default = "default_start_frame")]
    pub start_frame: Frame,
    #[serde(default = "StageConfig::disabled")]
    pub creation: StageConfig,
    #[serde(default = "StageConfig::disabled")]
    pub explode: StageConfig,
    #[serde(default)]
    pub easing: EasingKind,
    #[serde(default)]
    pub rotation: RotationConfig,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            start_frame: default_start_frame(),
            creation: StageConfig::disabled(),
            explode: StageConfig::disabled(),
            easing: EasingKind::default(),
            rotation: RotationConfig::default(),
        }
    }
}

impl AnimationConfig {
    #[must_use]
    pub fn with_start_frame(mut self, start_frame: Frame) -> Self {
        self.start_frame = start_frame;
        self
    }

    #[must_use]
    pub fn with_creation(mut self, creation: StageConfig) -> Self {
        self.creation = creation;
        self
    }

    #[must_use]
    pub fn with_explode(mut self, explode: StageConfig) -> Self {
        self.explode = explode;
        self
    }

    #[must_use]
    pub fn with_easing(mut self, easing: EasingKind) -> Self {
        self.easing = easing;
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation: RotationConfig) -> Self {
        self.rotation = rotation;
        self
    }

    #[must_use]
    pub fn schedule_spec(&self, explode_applicable: bool) -> ScheduleSpec {
        ScheduleSpec {
            start_frame: self.start_frame,
            creation: self.creation,
            explode: self.explode,
            rotation: self.rotation,
            explode_applicable,
        }
    }
}

fn default_pie_radius() -> f64 {
    2.0
}

fn default_pie_height() -> f64 {
    0.5
}

fn default_text_size() -> f64 {
    0.5
}

fn default_text_offset() -> f64 {
    0.5
}

fn default_subdivisions() -> usize {
    32
}

fn default_camera_distance() -> f64 {
    10.0
}

fn default_light_power() -> f64 {
    10.0
}

fn default_background() -> Color {
    Color::rgb(0.1, 0.1, 0.1)
}

fn default_primitive() -> PrimitiveKind {
    PrimitiveKind::Cube
}

fn default_color_a() -> Color {
    Color::rgb(0.2, 0.4, 0.8)
}

fn default_color_b() -> Color {
    Color::rgb(0.8, 0.2, 0.4)
}

fn default_categorical_spacing() -> f64 {
    2.0
}

fn default_label_size() -> f64 {
    0.5
}

fn default_start_frame() -> Frame {
    1
}
