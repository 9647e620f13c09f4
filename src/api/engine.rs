use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::classifier::RoleAssignment;
use crate::core::loader::{CsvPreview, CsvTable, DEFAULT_PREVIEW_ROWS};
use crate::core::timeline::Timeline;
use crate::core::types::RowWarning;
use crate::error::ChartResult;
use crate::scene::{SceneAdapter, SceneFrame, apply_frame};

use super::scene_builder::{self, AssembledScene};
use super::validation::validate_chart_config;
use super::{ChartConfig, ChartKind};

/// Everything one generation pass decided, before any host mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationPlan {
    pub frame: SceneFrame,
    pub timeline: Timeline,
    /// Row-level issues collected over the whole pass.
    pub warnings: Vec<RowWarning>,
    /// Label/value columns used by a pie chart.
    pub roles: Option<RoleAssignment>,
    pub preview: CsvPreview,
}

impl GenerationPlan {
    #[must_use]
    pub fn skipped_rows(&self) -> usize {
        self.warnings.len()
    }
}

/// Orchestrates one run: load, classify, build, schedule, then apply.
///
/// The configuration is validated once here and never re-read mid-pass.
#[derive(Debug, Clone)]
pub struct ChartGenerator {
    config: ChartConfig,
}

impl ChartGenerator {
    pub fn new(config: ChartConfig) -> ChartResult<Self> {
        let config = validate_chart_config(&config)?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn plan_from_path(&self, path: impl AsRef<Path>) -> ChartResult<GenerationPlan> {
        let table = CsvTable::from_path(path)?;
        self.plan_from_table(&table)
    }

    pub fn plan_from_reader<R: Read>(&self, reader: R) -> ChartResult<GenerationPlan> {
        let table = CsvTable::from_reader(reader)?;
        self.plan_from_table(&table)
    }

    /// Computes the full plan without touching any host state.
    pub fn plan_from_table(&self, table: &CsvTable) -> ChartResult<GenerationPlan> {
        let AssembledScene {
            frame,
            timeline,
            warnings,
            roles,
        } = match &self.config.chart {
            ChartKind::Pie(options) => {
                scene_builder::assemble_pie(table, options, &self.config.animation)?
            }
            ChartKind::Plot(options) => {
                scene_builder::assemble_plot(table, options, &self.config.animation)?
            }
        };

        debug!(
            namespace = %frame.namespace,
            objects = frame.objects.len(),
            keyframes = frame.keyframes.len(),
            warnings = warnings.len(),
            "planned generation pass"
        );

        Ok(GenerationPlan {
            frame,
            timeline,
            warnings,
            roles,
            preview: table.preview(DEFAULT_PREVIEW_ROWS),
        })
    }

    /// Plans from `path`, then clears and rebuilds the namespace through
    /// `adapter`. Schema and aggregate errors return before any adapter call.
    pub fn generate<A: SceneAdapter>(
        &self,
        path: impl AsRef<Path>,
        adapter: &mut A,
    ) -> ChartResult<GenerationPlan> {
        let plan = self.plan_from_path(path)?;
        self.apply(plan, adapter)
    }

    pub fn generate_from_table<A: SceneAdapter>(
        &self,
        table: &CsvTable,
        adapter: &mut A,
    ) -> ChartResult<GenerationPlan> {
        let plan = self.plan_from_table(table)?;
        self.apply(plan, adapter)
    }

    fn apply<A: SceneAdapter>(
        &self,
        plan: GenerationPlan,
        adapter: &mut A,
    ) -> ChartResult<GenerationPlan> {
        apply_frame(adapter, &plan.frame)?;
        info!(
            namespace = self.config.namespace(),
            objects = plan.frame.objects.len(),
            skipped_rows = plan.skipped_rows(),
            timeline_end = ?plan.frame.timeline_end,
            "generated chart"
        );
        Ok(plan)
    }
}
