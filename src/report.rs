//! Status report sent to meshStack for a building block run.

use crate::meshstack::BuildingBlockRun;
use crate::runner::RunnerContext;
use crate::steps::StepDescriptor;
use serde::{Deserialize, Serialize};

pub const SOURCE_ID: &str = "github";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRef {
    pub id: String,
    pub external_run_id: u64,
    pub external_run_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReportRequest {
    pub source: SourceRef,
    pub steps: Vec<StepDescriptor>,
}

pub fn build_status_report(
    context: &RunnerContext,
    steps: Vec<StepDescriptor>,
) -> StatusReportRequest {
    StatusReportRequest {
        source: SourceRef {
            id: SOURCE_ID.to_string(),
            external_run_id: context.run_id,
            external_run_url: context.external_run_url(),
        },
        steps,
    }
}

/// `{self link}/status/source`, the registration endpoint of a run.
pub fn status_source_url(run: &BuildingBlockRun) -> String {
    format!("{}/status/source", run.self_url().trim_end_matches('/'))
}
