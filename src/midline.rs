//! Per-vertebra midline segments and the finer midpoint series.
//!
//! A vertebra's midline joins the midpoints of its two corner diagonals
//! (`c0`–`c2` and `c3`–`c1`); its direction approximates the endplate tilt.
//! The curve-shape test instead works on the midpoints of the adjacent corner
//! pairs (`c0`–`c1` and `c2`–`c3`), two per vertebra.
use crate::angle::{is_degenerate, midpoint};
use crate::error::CobbError;
use crate::types::{Point2, Vector2, VertebraKeypoints, VertebraSequence};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Midline {
    pub p1: Point2,
    pub p2: Point2,
}

impl Midline {
    pub fn from_keypoints(kp: &VertebraKeypoints) -> Self {
        let [c0, c1, c2, c3] = &kp.corners;
        Self {
            p1: midpoint(c0, c2),
            p2: midpoint(c3, c1),
        }
    }

    /// Direction `p2 - p1` used for every angle computation.
    pub fn tilt(&self) -> Vector2 {
        self.p2 - self.p1
    }

    /// Endpoints truncated toward zero to integer pixels, as drawn on overlays.
    pub fn pixel_endpoints(&self) -> [[i64; 2]; 2] {
        [
            [self.p1.x as i64, self.p1.y as i64],
            [self.p2.x as i64, self.p2.y as i64],
        ]
    }
}

pub fn build_midlines(sequence: &VertebraSequence) -> Vec<Midline> {
    sequence.iter().map(Midline::from_keypoints).collect()
}

/// Midpoints of `c0`–`c1` and `c2`–`c3` for every vertebra, in sequence order.
///
/// Entry `2 * i` belongs to vertebra `i` and is the one whose y coordinate
/// drives the S-curve orientation decision.
pub fn midpoint_series(sequence: &VertebraSequence) -> Vec<Point2> {
    let mut series = Vec::with_capacity(sequence.len() * 2);
    for kp in sequence {
        let [c0, c1, c2, c3] = &kp.corners;
        series.push(midpoint(c0, c1));
        series.push(midpoint(c2, c3));
    }
    series
}

/// Midlines, tilt vectors and midpoint series derived from one sequence.
///
/// Built once per computation; the three views always describe the same
/// vertebrae in the same order.
#[derive(Clone, Debug)]
pub struct SpineGeometry {
    midlines: Vec<Midline>,
    tilts: Vec<Vector2>,
    series: Vec<Point2>,
}

impl SpineGeometry {
    pub fn from_sequence(sequence: &VertebraSequence) -> Result<Self, CobbError> {
        let midlines = build_midlines(sequence);
        let tilts = tilt_vectors(sequence, &midlines)?;
        let series = midpoint_series(sequence);
        Ok(Self {
            midlines,
            tilts,
            series,
        })
    }

    /// Number of vertebrae.
    pub fn len(&self) -> usize {
        self.midlines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.midlines.is_empty()
    }

    pub fn midlines(&self) -> &[Midline] {
        &self.midlines
    }

    pub fn tilts(&self) -> &[Vector2] {
        &self.tilts
    }

    pub fn series(&self) -> &[Point2] {
        &self.series
    }

    /// y of the `c0`–`c1` midpoint of vertebra `index`.
    pub fn anchor_y(&self, index: usize) -> f64 {
        self.series[2 * index].y
    }

    pub fn into_midlines(self) -> Vec<Midline> {
        self.midlines
    }
}

/// Tilt vectors of all midlines, rejecting vertebrae whose keypoints are
/// non-finite or whose tilt has zero length.
pub fn tilt_vectors(
    sequence: &VertebraSequence,
    midlines: &[Midline],
) -> Result<Vec<Vector2>, CobbError> {
    let mut tilts = Vec::with_capacity(midlines.len());
    for (index, (kp, line)) in sequence.iter().zip(midlines).enumerate() {
        if !kp.is_finite() {
            return Err(CobbError::NonFiniteKeypoint { index });
        }
        let tilt = line.tilt();
        if is_degenerate(&tilt) {
            return Err(CobbError::DegenerateVertebra { index });
        }
        tilts.push(tilt);
    }
    Ok(tilts)
}
