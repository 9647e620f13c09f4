pub mod category;
pub mod classifier;
pub mod color;
pub mod framing;
pub mod geometry;
pub mod loader;
pub mod pie;
pub mod plot;
pub mod timeline;
pub mod types;

pub use category::CategoryIndex;
pub use classifier::{ColumnRole, RoleAssignment, assign_roles, classify, classify_table};
pub use color::{Color, ColorGradient, ColorRange, alternating, index_palette};
pub use framing::{Bounds3, CameraPreset, CameraSpec, LightKind, LightSpec, LightingPreset};
pub use geometry::{FaceLoop, MeshGeometry, PrimitiveKind, TextAlign, Transform};
pub use loader::{ColumnRef, ColumnRequirement, CsvPreview, CsvTable, load, load_label_value};
pub use pie::{
    LabelOrientation, SliceLayout, SortPolicy, WedgeSpec, build_wedge, explode_offset,
    label_anchor, layout_slices,
};
pub use plot::{AxisSpec, PlotLayout, PlotPrimitive, PlotSpec, build_plot};
pub use timeline::{
    EasingKind, HandleType, RotationConfig, ScheduleSpec, StageConfig, StageSpan, Timeline,
    schedule,
};
pub use types::{ChartItem, DataRecord, Frame, LoadReport, RowIssue, RowWarning};
