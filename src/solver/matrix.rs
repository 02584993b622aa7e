//! Pairwise tilt angles between all vertebrae.
use crate::angle::angle_between_deg;
use crate::error::CobbError;
use crate::types::Vector2;
use nalgebra::DMatrix;

/// Symmetric `n × n` matrix of angles in degrees, range [0, 180].
///
/// Only the upper triangle is computed; the lower triangle is a mirror, so
/// symmetry is exact. Diagonal entries are exactly zero and never take part
/// in a maximum search.
#[derive(Clone, Debug)]
pub struct AngleMatrix {
    degrees: DMatrix<f64>,
}

/// The two most mutually tilted vertebrae.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PrimaryPair {
    pub angle_deg: f64,
    /// First row holding the global maximum (always the smaller index).
    pub upper: usize,
    /// First column of that row holding the maximum.
    pub lower: usize,
}

impl AngleMatrix {
    pub fn from_tilts(tilts: &[Vector2]) -> Result<Self, CobbError> {
        let n = tilts.len();
        let mut degrees = DMatrix::<f64>::zeros(n, n);
        for i in 0..n {
            for j in (i + 1)..n {
                let angle = angle_between_deg(&tilts[i], &tilts[j])
                    .filter(|a| a.is_finite())
                    .ok_or(CobbError::NonFiniteAngle { top: i, bottom: j })?;
                degrees[(i, j)] = angle;
                degrees[(j, i)] = angle;
            }
        }
        Ok(Self { degrees })
    }

    pub fn len(&self) -> usize {
        self.degrees.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.degrees.nrows() == 0
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.degrees[(i, j)]
    }

    /// Maximum of row `i` over `j != i`, with the first maximal column.
    /// `None` for a matrix with fewer than two rows.
    pub fn row_max(&self, i: usize) -> Option<(f64, usize)> {
        let mut best: Option<(f64, usize)> = None;
        for j in (0..self.len()).filter(|&j| j != i) {
            let v = self.get(i, j);
            match best {
                Some((b, _)) if v <= b => {}
                _ => best = Some((v, j)),
            }
        }
        best
    }

    /// Global maximum over all rows; ties resolve to the first row, then the
    /// first column in scan order.
    pub fn primary_pair(&self) -> Option<PrimaryPair> {
        let mut best: Option<PrimaryPair> = None;
        for i in 0..self.len() {
            let Some((angle_deg, j)) = self.row_max(i) else {
                continue;
            };
            match best {
                Some(b) if angle_deg <= b.angle_deg => {}
                _ => {
                    best = Some(PrimaryPair {
                        angle_deg,
                        upper: i,
                        lower: j,
                    })
                }
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tilts(slopes: &[f64]) -> Vec<Vector2> {
        slopes.iter().map(|&s| Vector2::new(1.0, s)).collect()
    }

    #[test]
    fn matrix_is_symmetric_with_zero_diagonal() {
        let m = AngleMatrix::from_tilts(&tilts(&[0.0, 0.3, -0.25, 0.1, 0.7])).unwrap();
        for i in 0..m.len() {
            assert_eq!(m.get(i, i), 0.0);
            for j in 0..m.len() {
                assert!((m.get(i, j) - m.get(j, i)).abs() < 1e-6);
                assert!((0.0..=180.0).contains(&m.get(i, j)));
            }
        }
    }

    #[test]
    fn primary_pair_picks_first_maximum() {
        let m = AngleMatrix::from_tilts(&tilts(&[0.0, 0.2, -0.2, 0.0])).unwrap();
        let pair = m.primary_pair().unwrap();
        assert_eq!((pair.upper, pair.lower), (1, 2));
        let expected = (0.2f64.atan() * 2.0).to_degrees();
        assert!((pair.angle_deg - expected).abs() < 1e-9);
    }

    #[test]
    fn identical_tilts_give_zero_with_offdiagonal_partner() {
        let m = AngleMatrix::from_tilts(&tilts(&[0.1, 0.1, 0.1])).unwrap();
        let pair = m.primary_pair().unwrap();
        assert_eq!(pair.angle_deg, 0.0);
        assert_eq!((pair.upper, pair.lower), (0, 1));
    }

    #[test]
    fn single_row_has_no_pair() {
        let m = AngleMatrix::from_tilts(&tilts(&[0.1])).unwrap();
        assert!(m.row_max(0).is_none());
        assert!(m.primary_pair().is_none());
    }
}
