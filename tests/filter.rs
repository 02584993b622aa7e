mod common;

use cobb_angle::detection::filter_detections;
use cobb_angle::params::FilterParams;
use cobb_angle::types::{BoundingBox, Detection, VertebraKeypoints};
use common::synthetic_spine::{detections, spine};

fn boxed(bbox: [f64; 4], score: f64) -> Detection {
    let [x0, y0, x1, y1] = bbox;
    Detection {
        bbox: BoundingBox::from(bbox),
        score,
        keypoints: VertebraKeypoints::from_xy([[x0, y0], [x1, y0], [x0, y1], [x1, y1]]),
    }
}

#[test]
fn threshold_then_suppression_leaves_known_survivors() {
    let a = boxed([0.0, 0.0, 30.0, 30.0], 0.9);
    // IoU(a, b) = 600 / 1200
    let b = boxed([0.0, 10.0, 30.0, 40.0], 0.4);
    let c = boxed([0.0, 100.0, 30.0, 130.0], 0.95);
    // IoU(a, d) = 600 / 1200
    let d = boxed([0.0, -10.0, 30.0, 20.0], 0.7);
    assert!((a.bbox.iou(&b.bbox) - 0.5).abs() < 1e-12);
    assert!((a.bbox.iou(&d.bbox) - 0.5).abs() < 1e-12);

    let out = filter_detections(&[a, b, c, d], &FilterParams::default()).unwrap();
    assert_eq!(out.above_threshold, 3);
    assert_eq!(out.scores, vec![0.9, 0.95]);
    assert_eq!(
        out.boxes,
        vec![
            BoundingBox::new(0.0, 0.0, 30.0, 30.0),
            BoundingBox::new(0.0, 100.0, 30.0, 130.0)
        ]
    );
}

#[test]
fn overlapping_pair_keeps_only_the_higher_score() {
    let low = boxed([0.0, 0.0, 30.0, 30.0], 0.6);
    let high = boxed([0.0, 10.0, 30.0, 40.0], 0.8);
    let out = filter_detections(&[low, high], &FilterParams::default()).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out.scores, vec![0.8]);
}

#[test]
fn sorted_sequence_passes_through_unchanged() {
    let seq = spine(
        &[100.0, 104.0, 110.0, 104.0, 98.0],
        &[0.0, 0.1, 0.2, -0.1, -0.05],
        0.0,
    );
    let mut dets = detections(&seq, 0.9);
    for (i, d) in dets.iter_mut().enumerate() {
        d.score = 0.6 + 0.07 * ((i * 3) % 5) as f64;
    }
    let out = filter_detections(&dets, &FilterParams::default()).unwrap();
    assert_eq!(out.sequence, seq);
}

#[test]
fn shuffled_input_is_reordered_top_to_bottom() {
    let seq = spine(&[100.0; 5], &[0.0; 5], 0.0);
    let mut dets = detections(&seq, 0.9);
    dets.swap(0, 4);
    dets.swap(1, 3);
    let out = filter_detections(&dets, &FilterParams::default()).unwrap();
    assert_eq!(out.sequence, seq);
}
