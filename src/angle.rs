//! Vector geometry shared by the midline builder, shape test and solver.

use crate::types::{Point2, Vector2};

/// Tilt vectors shorter than this are treated as zero-length.
pub const MIN_VECTOR_NORM: f64 = 1e-9;

#[inline]
pub fn midpoint(a: &Point2, b: &Point2) -> Point2 {
    nalgebra::center(a, b)
}

/// True when `v` cannot carry a direction: zero-length or non-finite.
#[inline]
pub fn is_degenerate(v: &Vector2) -> bool {
    let norm = v.norm();
    !norm.is_finite() || norm <= MIN_VECTOR_NORM
}

/// Computes the unsigned angle between two 2D vectors in radians.
/// Returns a value in [0, π], or `None` when either vector is degenerate.
///
/// The cosine is clamped to [-1, 1] before `acos` so that rounding on nearly
/// parallel vectors cannot produce NaN.
#[inline]
pub fn angle_between(a: &Vector2, b: &Vector2) -> Option<f64> {
    if is_degenerate(a) || is_degenerate(b) {
        return None;
    }
    let cos = a.dot(b) / (a.norm() * b.norm());
    Some(cos.clamp(-1.0, 1.0).acos())
}

/// Same as [`angle_between`] but in degrees, range [0, 180].
#[inline]
pub fn angle_between_deg(a: &Vector2, b: &Vector2) -> Option<f64> {
    angle_between(a, b).map(f64::to_degrees)
}
