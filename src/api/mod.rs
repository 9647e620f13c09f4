mod config;
mod engine;
mod plan_json;
mod scene_builder;
mod validation;

pub use config::{
    AnimationConfig, ChartConfig, ChartKind, PIE_NAMESPACE, PLOT_NAMESPACE, PieColorScheme,
    PieOptions, PieSceneOptions, PlotOptions, PlotPreset,
};
pub use engine::{ChartGenerator, GenerationPlan};
pub use plan_json::PLAN_SCHEMA_VERSION;
pub use validation::{MAX_SUBDIVISIONS, MIN_SUBDIVISIONS};
