//! Greedy non-maximum suppression over axis-aligned boxes.
use crate::types::{BoundingBox, Detection};
use std::cmp::Ordering;

/// Returns indices into `boxes` that survive greedy suppression, ordered by
/// descending score.
///
/// Candidates are visited from the highest score down; one is kept when its
/// IoU with every previously kept box is below `iou_threshold`. Equal scores
/// keep their input order.
pub fn nms_keep_indices(boxes: &[BoundingBox], scores: &[f64], iou_threshold: f64) -> Vec<usize> {
    debug_assert_eq!(boxes.len(), scores.len());
    let mut order: Vec<usize> = (0..boxes.len().min(scores.len())).collect();
    order.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(Ordering::Equal)
    });

    let mut keep: Vec<usize> = Vec::with_capacity(order.len());
    for idx in order {
        let candidate = &boxes[idx];
        if keep
            .iter()
            .all(|&k| boxes[k].iou(candidate) < iou_threshold)
        {
            keep.push(idx);
        }
    }
    keep
}

/// Convenience wrapper running [`nms_keep_indices`] on detections directly.
pub fn greedy_nms(detections: Vec<Detection>, iou_threshold: f64) -> Vec<Detection> {
    let boxes: Vec<BoundingBox> = detections.iter().map(|d| d.bbox).collect();
    let scores: Vec<f64> = detections.iter().map(|d| d.score).collect();
    let keep = nms_keep_indices(&boxes, &scores, iou_threshold);

    let mut slots: Vec<Option<Detection>> = detections.into_iter().map(Some).collect();
    keep.into_iter()
        .filter_map(|idx| slots[idx].take())
        .collect()
}
