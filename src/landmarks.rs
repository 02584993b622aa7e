//! Flat landmark layout `[x_0, .., x_{4n-1}, y_0, .., y_{4n-1}]`.
//!
//! This is the interchange format used by annotation tools for spinal
//! landmark datasets: all x coordinates of all corners first, then all y
//! coordinates, four corners per vertebra in detector order.
use crate::error::CobbError;
use crate::types::{VertebraKeypoints, VertebraSequence};

pub fn landmark_xy(sequence: &VertebraSequence) -> Vec<f64> {
    let corners = sequence.iter().flat_map(|kp| kp.corners.iter());
    let xs = corners.clone().map(|p| p.x);
    let ys = corners.map(|p| p.y);
    xs.chain(ys).collect()
}

pub fn sequence_from_landmark_xy(xy: &[f64]) -> Result<VertebraSequence, CobbError> {
    if xy.len() % 8 != 0 {
        return Err(CobbError::MalformedLandmarks { len: xy.len() });
    }
    let half = xy.len() / 2;
    let (xs, ys) = xy.split_at(half);
    let vertebrae = xs
        .chunks_exact(4)
        .zip(ys.chunks_exact(4))
        .map(|(x, y)| {
            VertebraKeypoints::from_xy([[x[0], y[0]], [x[1], y[1]], [x[2], y[2]], [x[3], y[3]]])
        })
        .collect::<Vec<_>>();
    Ok(vertebrae.into())
}
