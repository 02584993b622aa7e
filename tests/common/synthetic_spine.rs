use cobb_angle::types::{BoundingBox, Detection, Point2, Vector2, VertebraKeypoints, VertebraSequence};

/// Vertebra centred at `(cx, cy)` whose midline direction is `(1, slope)`.
///
/// Coordinates stay on a half-integer grid for integer inputs and slopes in
/// steps of 0.05, so chord ratios in the shape test are exact.
pub fn vertebra(cx: f64, cy: f64, slope: f64) -> VertebraKeypoints {
    let dx = 20.0;
    let dy = 20.0 * slope;
    VertebraKeypoints::from_xy([
        [cx - dx, cy - dy - 6.0],
        [cx + dx, cy + dy - 6.0],
        [cx - dx, cy - dy + 6.0],
        [cx + dx, cy + dy + 6.0],
    ])
}

/// Sequence with vertebrae spaced 30 px apart starting at `y0`, lateral
/// offsets `xs` and tilts `slopes`.
pub fn spine(xs: &[f64], slopes: &[f64], y0: f64) -> VertebraSequence {
    assert_eq!(xs.len(), slopes.len());
    xs.iter()
        .zip(slopes)
        .enumerate()
        .map(|(i, (&x, &s))| vertebra(x, y0 + 30.0 * i as f64, s))
        .collect::<Vec<_>>()
        .into()
}

/// Straight column of `n` identical vertebrae leaning `lean` radians from
/// vertical, each endplate perpendicular to the column axis.
///
/// Every corner-pair midpoint lies on the axis, so the midpoint series is
/// collinear and all tilt vectors are equal.
pub fn leaning_column(n: usize, lean: f64, origin: Point2) -> VertebraSequence {
    let (sin, cos) = lean.sin_cos();
    let axis = Vector2::new(sin, cos);
    let across = Vector2::new(cos, -sin);
    let (half_w, half_h) = (20.0, 5.0);
    (0..n)
        .map(|i| {
            let c = origin + axis * (30.0 * i as f64);
            VertebraKeypoints::new([
                c - across * half_w - axis * half_h,
                c + across * half_w - axis * half_h,
                c - across * half_w + axis * half_h,
                c + across * half_w + axis * half_h,
            ])
        })
        .collect::<Vec<_>>()
        .into()
}

pub fn detection(kp: VertebraKeypoints, score: f64) -> Detection {
    let xs = kp.corners.iter().map(|p| p.x);
    let ys = kp.corners.iter().map(|p| p.y);
    let bbox = BoundingBox::new(
        xs.clone().fold(f64::INFINITY, f64::min),
        ys.clone().fold(f64::INFINITY, f64::min),
        xs.fold(f64::NEG_INFINITY, f64::max),
        ys.fold(f64::NEG_INFINITY, f64::max),
    );
    Detection {
        bbox,
        score,
        keypoints: kp,
    }
}

pub fn detections(seq: &VertebraSequence, score: f64) -> Vec<Detection> {
    seq.iter().map(|&kp| detection(kp, score)).collect()
}
