//! Turns raw detections into the ordered vertebra sequence.
//!
//! 1. Confidence gate: keep detections scoring strictly above the threshold.
//! 2. Greedy NMS on the boxes of the survivors.
//! 3. Order by descending score, then stable re-sort by the y coordinate of
//!    each detection's first keypoint. The y order is authoritative; the score
//!    order only breaks ties between equal y values.
use super::nms::nms_keep_indices;
use crate::error::CobbError;
use crate::params::FilterParams;
use crate::types::{BoundingBox, Detection, VertebraSequence};
use log::debug;
use std::cmp::Ordering;

/// Accepted vertebrae with their scores and boxes kept in parallel.
///
/// `scores` and `boxes` exist for traceability only; the solver consumes
/// `sequence` alone.
#[derive(Clone, Debug, Default)]
pub struct FilteredDetections {
    pub sequence: VertebraSequence,
    pub scores: Vec<f64>,
    pub boxes: Vec<BoundingBox>,
    /// Detections received before any gating.
    pub total: usize,
    /// Detections left after the confidence gate.
    pub above_threshold: usize,
}

impl FilteredDetections {
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// Applies confidence gating, suppression and spinal ordering.
///
/// Returns `CobbError::NoKeypointsDetected` when nothing survives.
pub fn filter_detections(
    detections: &[Detection],
    params: &FilterParams,
) -> Result<FilteredDetections, CobbError> {
    let confident: Vec<&Detection> = detections
        .iter()
        .filter(|d| d.score.is_finite() && d.score > params.score_threshold)
        .collect();

    let boxes: Vec<BoundingBox> = confident.iter().map(|d| d.bbox).collect();
    let scores: Vec<f64> = confident.iter().map(|d| d.score).collect();
    // already in descending score order
    let mut kept = nms_keep_indices(&boxes, &scores, params.iou_threshold);

    kept.sort_by(|&a, &b| {
        let ya = confident[a].keypoints.corners[0].y;
        let yb = confident[b].keypoints.corners[0].y;
        ya.partial_cmp(&yb).unwrap_or(Ordering::Equal)
    });

    debug!(
        "filter_detections total={} above_threshold={} after_nms={}",
        detections.len(),
        confident.len(),
        kept.len()
    );

    if kept.is_empty() {
        return Err(CobbError::NoKeypointsDetected);
    }

    Ok(FilteredDetections {
        sequence: kept
            .iter()
            .map(|&i| confident[i].keypoints)
            .collect::<Vec<_>>()
            .into(),
        scores: kept.iter().map(|&i| confident[i].score).collect(),
        boxes: kept.iter().map(|&i| confident[i].bbox).collect(),
        total: detections.len(),
        above_threshold: confident.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VertebraKeypoints;

    fn det(y: f64, score: f64) -> Detection {
        Detection {
            bbox: BoundingBox::new(0.0, y, 20.0, y + 10.0),
            score,
            keypoints: VertebraKeypoints::from_xy([
                [0.0, y],
                [20.0, y],
                [0.0, y + 10.0],
                [20.0, y + 10.0],
            ]),
        }
    }

    #[test]
    fn output_is_ordered_top_to_bottom() {
        let dets = vec![det(100.0, 0.99), det(0.0, 0.6), det(50.0, 0.8)];
        let out = filter_detections(&dets, &FilterParams::default()).unwrap();
        let ys: Vec<f64> = out.sequence.iter().map(|v| v.corners[0].y).collect();
        assert_eq!(ys, vec![0.0, 50.0, 100.0]);
        assert_eq!(out.scores, vec![0.6, 0.8, 0.99]);
        assert_eq!(out.boxes.len(), 3);
    }

    #[test]
    fn threshold_is_strict() {
        let dets = vec![det(0.0, 0.5), det(50.0, 0.51)];
        let out = filter_detections(&dets, &FilterParams::default()).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out.above_threshold, 1);
        assert_eq!(out.total, 2);
    }

    #[test]
    fn nan_scores_are_dropped() {
        let dets = vec![det(0.0, f64::NAN)];
        let err = filter_detections(&dets, &FilterParams::default()).unwrap_err();
        assert_eq!(err, CobbError::NoKeypointsDetected);
    }

    #[test]
    fn empty_input_reports_no_keypoints() {
        let err = filter_detections(&[], &FilterParams::default()).unwrap_err();
        assert_eq!(err, CobbError::NoKeypointsDetected);
    }

    #[test]
    fn equal_y_keeps_score_order() {
        let mut a = det(0.0, 0.7);
        let mut b = det(0.0, 0.9);
        // side by side so NMS keeps both
        a.bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        b.bbox = BoundingBox::new(100.0, 0.0, 110.0, 10.0);
        let out = filter_detections(&[a, b], &FilterParams::default()).unwrap();
        assert_eq!(out.scores, vec![0.9, 0.7]);
    }
}
