//! Diagnostics returned alongside a [`CobbResult`].
//!
//! `EstimateReport` bundles the result with an `EstimateTrace` describing
//! what the filter kept and how long each stage took.

pub mod timing;

pub use timing::{StageTiming, TimingBreakdown};

use crate::result::CobbResult;
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateReport {
    pub result: CobbResult,
    pub trace: EstimateTrace,
}

impl EstimateReport {
    pub fn print_text_summary(&self) {
        println!("{}", self.result);
        if let Some(filter) = &self.trace.filter {
            println!(
                "  detections: total={} confident={} accepted={}",
                filter.total, filter.above_threshold, filter.accepted
            );
        }
        println!("  total {:.3} ms", self.trace.timings.total_ms);
        for stage in &self.trace.timings.stages {
            println!("    {:<10} {:.3} ms", stage.label, stage.elapsed_ms);
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateTrace {
    pub input: InputDescriptor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterStage>,
    pub timings: TimingBreakdown,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub vertebrae: usize,
    pub image_height: f64,
}

/// Counts and traceability arrays from detection filtering.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterStage {
    pub total: usize,
    pub above_threshold: usize,
    pub accepted: usize,
    pub scores: Vec<f64>,
    pub boxes: Vec<crate::types::BoundingBox>,
}
