//! Single-bend (C) versus double-bend (S) classification.
//!
//! For every point `i < n - 2` of the midpoint series the test measures
//!
//! ```text
//! l_i = (y_i - y_last) / (y_0 - y_last) - (x_i - x_last) / (x_0 - x_last)
//! ```
//!
//! i.e. a ratio-difference deviation from the chord joining the first and last
//! points. When all deviations share a sign the spine bows one way (C); when
//! some are positive and others negative the midpoints cross the chord (S).
//! Deviations within `ShapeParams::sign_tolerance` of zero are neutral, so
//! a collinear series stays C despite rounding; `l_0` is always zero.
use crate::error::{CobbError, ShapeTestFailure};
use crate::params::{DegenerateShapePolicy, ShapeParams};
use crate::types::Point2;
use log::debug;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum CurveType {
    C,
    S,
}

impl std::fmt::Display for CurveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CurveType::C => write!(f, "C"),
            CurveType::S => write!(f, "S"),
        }
    }
}

/// Chord deviations of the series, one per point `0..n-2`.
pub fn chord_deviations(series: &[Point2]) -> Result<Vec<f64>, ShapeTestFailure> {
    let n = series.len();
    if n < 3 {
        return Ok(Vec::new());
    }
    let first = series[0];
    let last = series[n - 1];
    let dx = first.x - last.x;
    let dy = first.y - last.y;
    if dx == 0.0 {
        return Err(ShapeTestFailure::ZeroHorizontalSpan);
    }
    if dy == 0.0 {
        return Err(ShapeTestFailure::ZeroVerticalSpan);
    }

    series[..n - 2]
        .iter()
        .enumerate()
        .map(|(index, p)| {
            let l = (p.y - last.y) / dy - (p.x - last.x) / dx;
            if l.is_finite() {
                Ok(l)
            } else {
                Err(ShapeTestFailure::NonFiniteDeviation { index })
            }
        })
        .collect()
}

/// True when some deviation exceeds `tolerance` and another lies below
/// `-tolerance`.
pub fn has_sign_change(deviations: &[f64], tolerance: f64) -> bool {
    let positive = deviations.iter().any(|&l| l > tolerance);
    let negative = deviations.iter().any(|&l| l < -tolerance);
    positive && negative
}

pub fn classify_curve(series: &[Point2], params: &ShapeParams) -> Result<CurveType, CobbError> {
    let deviations = match chord_deviations(series) {
        Ok(l) => l,
        Err(
            reason @ (ShapeTestFailure::ZeroHorizontalSpan | ShapeTestFailure::ZeroVerticalSpan),
        ) => {
            debug!("classify_curve degenerate chord: {reason}");
            return match params.degenerate_policy {
                DegenerateShapePolicy::TreatAsC => Ok(CurveType::C),
                DegenerateShapePolicy::Error => Err(CobbError::UndefinedShapeTest { reason }),
            };
        }
        Err(reason) => return Err(CobbError::UndefinedShapeTest { reason }),
    };

    let curve = if has_sign_change(&deviations, params.sign_tolerance) {
        CurveType::S
    } else {
        CurveType::C
    };
    debug!(
        "classify_curve points={} deviations={} curve={curve}",
        series.len(),
        deviations.len()
    );
    Ok(curve)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(xy: &[[f64; 2]]) -> Vec<Point2> {
        xy.iter().map(|p| Point2::new(p[0], p[1])).collect()
    }

    #[test]
    fn single_bow_is_c() {
        let series = pts(&[[0.0, 0.0], [3.0, 10.0], [4.0, 20.0], [3.0, 30.0], [1.0, 40.0]]);
        assert_eq!(
            classify_curve(&series, &ShapeParams::default()).unwrap(),
            CurveType::C
        );
    }

    #[test]
    fn crossing_the_chord_is_s() {
        let series = pts(&[
            [0.0, 0.0],
            [4.0, 10.0],
            [5.0, 20.0],
            [1.0, 30.0],
            [-3.0, 40.0],
            [-2.0, 50.0],
            [1.0, 60.0],
        ]);
        let l = chord_deviations(&series).unwrap();
        assert_eq!(l.len(), 5);
        assert_eq!(l[0], 0.0);
        assert!(has_sign_change(&l, 1e-9));
        assert_eq!(
            classify_curve(&series, &ShapeParams::default()).unwrap(),
            CurveType::S
        );
    }

    #[test]
    fn short_series_is_c() {
        let series = pts(&[[0.0, 0.0], [1.0, 1.0]]);
        assert!(chord_deviations(&series).unwrap().is_empty());
        assert_eq!(
            classify_curve(&series, &ShapeParams::default()).unwrap(),
            CurveType::C
        );
    }

    #[test]
    fn vertical_chord_follows_policy() {
        let series = pts(&[[0.0, 0.0], [2.0, 10.0], [-2.0, 20.0], [0.0, 30.0]]);
        assert_eq!(
            classify_curve(&series, &ShapeParams::default()).unwrap(),
            CurveType::C
        );
        let strict = ShapeParams {
            degenerate_policy: DegenerateShapePolicy::Error,
            ..Default::default()
        };
        assert_eq!(
            classify_curve(&series, &strict).unwrap_err(),
            CobbError::UndefinedShapeTest {
                reason: ShapeTestFailure::ZeroHorizontalSpan
            }
        );
    }

    #[test]
    fn zeros_do_not_count_as_a_sign() {
        assert!(!has_sign_change(&[0.0, 0.0, 1.5], 0.0));
        assert!(!has_sign_change(&[0.0, -0.1, -2.0], 0.0));
        assert!(has_sign_change(&[0.0, -0.1, 0.2], 0.0));
    }

    #[test]
    fn rounding_noise_is_not_a_sign_change() {
        assert!(!has_sign_change(&[0.0, 2e-16, -1e-16, 4e-16], 1e-9));
        assert!(has_sign_change(&[0.0, 2e-16, -1e-16, 4e-16], 0.0));
        assert!(has_sign_change(&[0.0, 1e-3, -1e-3], 1e-9));
    }

    #[test]
    fn leaning_collinear_series_is_c() {
        let params = ShapeParams::default();
        for step in 1..40 {
            let lean = 0.01 * step as f64;
            let (sin, cos) = lean.sin_cos();
            let series: Vec<Point2> = (0..16)
                .map(|i| {
                    let t = 7.3 + 15.1 * i as f64;
                    Point2::new(101.7 + t * sin, 13.9 + t * cos)
                })
                .collect();
            assert_eq!(
                classify_curve(&series, &params).unwrap(),
                CurveType::C,
                "lean {lean}"
            );
        }
    }
}
