//! Range-scoped maximum searches anchored at one vertebra.
use super::matrix::AngleMatrix;
use std::ops::Range;

/// Largest angle between a pivot vertebra and a range of vertebrae.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangeMax {
    pub angle_deg: f64,
    /// Absolute index into the vertebra sequence.
    pub index: usize,
}

/// Maximum of `angle(pivot, j)` for `j` in `range`, first maximal `j` on ties.
///
/// The range is clipped to the matrix size; `None` when nothing is left to
/// search. The pivot may lie inside the range; its self-angle is zero.
pub fn argmax_angle_in_range(
    matrix: &AngleMatrix,
    pivot: usize,
    range: Range<usize>,
) -> Option<RangeMax> {
    let end = range.end.min(matrix.len());
    let mut best: Option<RangeMax> = None;
    for j in range.start..end {
        let v = matrix.get(pivot, j);
        match best {
            Some(b) if v <= b.angle_deg => {}
            _ => {
                best = Some(RangeMax {
                    angle_deg: v,
                    index: j,
                })
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Vector2;

    fn matrix(slopes: &[f64]) -> AngleMatrix {
        let tilts: Vec<Vector2> = slopes.iter().map(|&s| Vector2::new(1.0, s)).collect();
        AngleMatrix::from_tilts(&tilts).unwrap()
    }

    #[test]
    fn search_is_restricted_to_range() {
        let m = matrix(&[0.5, 0.0, 0.1, -0.6, 0.0]);
        // 3 is the best partner overall but lies outside 0..2
        let r = argmax_angle_in_range(&m, 2, 0..2).unwrap();
        assert_eq!(r.index, 0);
        assert!((r.angle_deg - m.get(2, 0)).abs() < 1e-12);
    }

    #[test]
    fn ties_keep_first_index() {
        let m = matrix(&[0.3, 0.3, 0.0]);
        let r = argmax_angle_in_range(&m, 2, 0..2).unwrap();
        assert_eq!(r.index, 0);
    }

    #[test]
    fn range_including_pivot_scores_it_zero() {
        let m = matrix(&[0.0, 0.0, 0.0]);
        let r = argmax_angle_in_range(&m, 1, 1..3);
        assert_eq!(r, Some(RangeMax { angle_deg: 0.0, index: 1 }));
    }

    #[test]
    fn empty_range_has_no_maximum() {
        let m = matrix(&[0.0, 0.4]);
        assert_eq!(argmax_angle_in_range(&m, 0, 0..0), None);
        // clipped to the two vertebrae present, leaving nothing
        assert_eq!(argmax_angle_in_range(&m, 1, 2..10), None);
    }
}
