//! chart3d: CSV data to parametric 3D chart geometry and animation timelines.
//!
//! The crate decides what geometry to build and when each animated change
//! happens; a host application realizes the result through [`scene::SceneAdapter`].

pub mod api;
pub mod core;
pub mod error;
pub mod scene;
pub mod telemetry;

pub use api::{ChartConfig, ChartGenerator, GenerationPlan};
pub use error::{ChartError, ChartResult};
