//! End-to-end entry point: detections in, [`CobbResult`] out.
//!
//! The estimator holds only its parameters; every call builds its geometry,
//! angle matrix and result from scratch, so one instance can be shared
//! across threads.
use crate::detection::{filter_detections, KeypointDetector};
use crate::diagnostics::{
    EstimateReport, EstimateTrace, FilterStage, InputDescriptor, TimingBreakdown,
};
use crate::error::CobbError;
use crate::midline::SpineGeometry;
use crate::params::EstimatorParams;
use crate::result::{assemble, CobbResult};
use crate::shape::classify_curve;
use crate::solver::solve;
use crate::types::{Detection, VertebraSequence};
use image::DynamicImage;
use log::debug;
use std::time::Instant;

/// Failure of [`CobbEstimator::analyze_image`]: either the detector or the
/// geometry failed.
#[derive(Debug)]
pub enum AnalyzeError<E> {
    Detector(E),
    Cobb(CobbError),
}

impl<E: std::fmt::Display> std::fmt::Display for AnalyzeError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalyzeError::Detector(e) => write!(f, "keypoint detector failed: {e}"),
            AnalyzeError::Cobb(e) => write!(f, "{e}"),
        }
    }
}

impl<E: std::fmt::Debug + std::fmt::Display> std::error::Error for AnalyzeError<E> {}

#[derive(Clone, Debug, Default)]
pub struct CobbEstimator {
    params: EstimatorParams,
}

impl CobbEstimator {
    pub fn new(params: EstimatorParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &EstimatorParams {
        &self.params
    }

    /// Filters raw detections and measures the accepted vertebrae.
    pub fn estimate(
        &self,
        detections: &[Detection],
        image_height: f64,
    ) -> Result<CobbResult, CobbError> {
        self.estimate_with_diagnostics(detections, image_height)
            .map(|report| report.result)
    }

    pub fn estimate_with_diagnostics(
        &self,
        detections: &[Detection],
        image_height: f64,
    ) -> Result<EstimateReport, CobbError> {
        let t0 = Instant::now();
        let filtered = filter_detections(detections, &self.params.filter)?;
        let filter_ms = t0.elapsed().as_secs_f64() * 1000.0;

        let filter_stage = FilterStage {
            total: filtered.total,
            above_threshold: filtered.above_threshold,
            accepted: filtered.len(),
            scores: filtered.scores,
            boxes: filtered.boxes,
        };
        let mut report = self.measure_sequence(&filtered.sequence, image_height)?;
        report.trace.filter = Some(filter_stage);
        report.trace.timings.stages.insert(
            0,
            crate::diagnostics::StageTiming::new("filter", filter_ms),
        );
        report.trace.timings.total_ms = t0.elapsed().as_secs_f64() * 1000.0;
        Ok(report)
    }

    /// Measures an already ordered sequence, skipping detection filtering.
    pub fn estimate_sequence(
        &self,
        sequence: &VertebraSequence,
        image_height: f64,
    ) -> Result<CobbResult, CobbError> {
        self.measure_sequence(sequence, image_height)
            .map(|report| report.result)
    }

    /// Runs `detector` on `image` and measures what it found. The image
    /// height feeds the S-curve orientation decision.
    pub fn analyze_image<D: KeypointDetector>(
        &self,
        detector: &mut D,
        image: &DynamicImage,
    ) -> Result<CobbResult, AnalyzeError<D::Error>> {
        let detections = detector.detect(image).map_err(AnalyzeError::Detector)?;
        self.estimate(&detections, f64::from(image.height()))
            .map_err(AnalyzeError::Cobb)
    }

    fn measure_sequence(
        &self,
        sequence: &VertebraSequence,
        image_height: f64,
    ) -> Result<EstimateReport, CobbError> {
        let t0 = Instant::now();
        let mut timings = TimingBreakdown::default();

        if sequence.len() < 2 {
            return Err(CobbError::InsufficientVertebrae {
                found: sequence.len(),
            });
        }

        let stage = Instant::now();
        let geometry = SpineGeometry::from_sequence(sequence)?;
        timings.push("midlines", stage.elapsed().as_secs_f64() * 1000.0);

        let stage = Instant::now();
        let curve = classify_curve(geometry.series(), &self.params.shape)?;
        timings.push("shape", stage.elapsed().as_secs_f64() * 1000.0);

        let stage = Instant::now();
        let output = solve(&geometry, curve, image_height)?;
        timings.push("solve", stage.elapsed().as_secs_f64() * 1000.0);

        let result = assemble(output.records, curve, output.s_branch, geometry.into_midlines());
        timings.total_ms = t0.elapsed().as_secs_f64() * 1000.0;
        debug!("CobbEstimator {result}");

        Ok(EstimateReport {
            result,
            trace: EstimateTrace {
                input: InputDescriptor {
                    vertebrae: sequence.len(),
                    image_height,
                },
                filter: None,
                timings,
            },
        })
    }
}
