//! Versioned JSON envelope for [`GenerationPlan`]: `{"schema_version": 1, "plan": ...}`.

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

use super::GenerationPlan;

pub const PLAN_SCHEMA_VERSION: u32 = 1;

#[derive(Serialize)]
struct PlanEnvelopeRef<'a> {
    schema_version: u32,
    plan: &'a GenerationPlan,
}

/// Version only; the plan is parsed once the version is known.
#[derive(Deserialize)]
struct EnvelopeHeader {
    schema_version: Option<u32>,
}

#[derive(Deserialize)]
struct PlanEnvelope {
    plan: GenerationPlan,
}

impl GenerationPlan {
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(&PlanEnvelopeRef {
            schema_version: PLAN_SCHEMA_VERSION,
            plan: self,
        })
        .map_err(|e| ChartError::InvalidData(format!("failed to serialize generation plan: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let invalid = |e: serde_json::Error| {
            ChartError::InvalidData(format!("failed to parse generation plan json: {e}"))
        };

        let header: EnvelopeHeader = serde_json::from_str(input).map_err(invalid)?;
        match header.schema_version {
            Some(PLAN_SCHEMA_VERSION) => {}
            Some(version) => {
                return Err(ChartError::InvalidData(format!(
                    "unsupported generation plan schema version {version}; expected {PLAN_SCHEMA_VERSION}"
                )));
            }
            None => {
                return Err(ChartError::InvalidData(
                    "generation plan json has no schema_version".to_owned(),
                ));
            }
        }

        let envelope: PlanEnvelope = serde_json::from_str(input).map_err(invalid)?;
        Ok(envelope.plan)
    }
}
