//! Parameter types configuring the estimator stages.
//!
//! Defaults reproduce the thresholds the vertebra detector was tuned with:
//! confidence above 0.5 and box suppression at IoU 0.3.

use serde::Deserialize;

/// Estimator-wide parameters.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct EstimatorParams {
    /// Detection confidence and suppression thresholds.
    pub filter: FilterParams,
    /// Curve-shape test configuration.
    pub shape: ShapeParams,
}

/// Detection post-processing thresholds.
///
/// - `score_threshold`: detections must score strictly above this value.
/// - `iou_threshold`: a box is dropped when its IoU with an already kept,
///   higher-scoring box reaches this value.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct FilterParams {
    pub score_threshold: f64,
    pub iou_threshold: f64,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            score_threshold: 0.5,
            iou_threshold: 0.3,
        }
    }
}

/// What the S-test does when the first and last midpoints share a coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegenerateShapePolicy {
    /// Classify as a single C curve.
    #[default]
    TreatAsC,
    /// Report `CobbError::UndefinedShapeTest`.
    Error,
}

/// Curve-shape test configuration.
///
/// - `degenerate_policy`: outcome when the chord has zero width or height.
/// - `sign_tolerance`: chord deviations within `±sign_tolerance` count as
///   zero. Deviations are ratios of the chord span, so the tolerance is
///   scale free; the default only absorbs floating-point rounding.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ShapeParams {
    pub degenerate_policy: DegenerateShapePolicy,
    pub sign_tolerance: f64,
}

impl Default for ShapeParams {
    fn default() -> Self {
        Self {
            degenerate_policy: DegenerateShapePolicy::TreatAsC,
            sign_tolerance: 1e-9,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let params: EstimatorParams =
            serde_json::from_str(r#"{ "filter": { "iou_threshold": 0.45 } }"#).unwrap();
        assert_eq!(params.filter.score_threshold, 0.5);
        assert_eq!(params.filter.iou_threshold, 0.45);
        assert_eq!(params.shape.degenerate_policy, DegenerateShapePolicy::TreatAsC);
        assert_eq!(params.shape.sign_tolerance, 1e-9);
    }

    #[test]
    fn policy_parses_snake_case() {
        let shape: ShapeParams =
            serde_json::from_str(r#"{ "degenerate_policy": "error" }"#).unwrap();
        assert_eq!(shape.degenerate_policy, DegenerateShapePolicy::Error);
    }
}
