//! Cobb angle search over an ordered vertebra geometry.
//!
//! The primary angle is the global maximum of the pairwise tilt matrix; its
//! two vertebrae (`upper` < `lower`) anchor the secondary searches:
//!
//! - **C curve**: MainThoracic is the angle between vertebra 0 and `upper`,
//!   Thoracolumbar the angle between `lower` and the last vertebra.
//! - **S curve, primary in the upper half** (sum of the two anchor y values
//!   below the image height): MainThoracic is the best partner of `upper`
//!   in `[0, upper)`; Thoracolumbar is the best partner of `lower` in
//!   `[lower, n)`, reported one position above the partner found.
//! - **S curve, primary in the lower half**: MainThoracic as above, giving
//!   `top`; Thoracolumbar is the best partner of `top` in `[0, top]`.
//!
//! An S curve whose primary pair starts at vertebra 0 leaves nothing above
//! it to search and is reported as [`CobbError::EmptySearchRange`].
pub mod matrix;
pub mod search;

pub use matrix::{AngleMatrix, PrimaryPair};
pub use search::{argmax_angle_in_range, RangeMax};

use crate::error::CobbError;
use crate::midline::SpineGeometry;
use crate::result::{AngleKind, AngleRecord, SBranch};
use crate::shape::CurveType;
use log::debug;
use std::ops::Range;

/// Angle records in Primary, MainThoracic, Thoracolumbar order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolverOutput {
    pub records: [AngleRecord; 3],
    pub s_branch: Option<SBranch>,
}

pub fn solve(
    geometry: &SpineGeometry,
    curve: CurveType,
    image_height: f64,
) -> Result<SolverOutput, CobbError> {
    let n = geometry.len();
    if n < 2 {
        return Err(CobbError::InsufficientVertebrae { found: n });
    }

    let matrix = AngleMatrix::from_tilts(geometry.tilts())?;
    let pair = matrix
        .primary_pair()
        .ok_or(CobbError::InsufficientVertebrae { found: n })?;
    debug!(
        "solve n={} primary={:.3} pair=({}, {}) curve={curve}",
        n, pair.angle_deg, pair.upper, pair.lower
    );

    let primary = AngleRecord::new(AngleKind::Primary, pair.angle_deg, pair.upper, pair.lower);
    let (main_thoracic, thoracolumbar, s_branch) = match curve {
        CurveType::C => {
            let (mt, tl) = c_curve(&matrix, &pair);
            (mt, tl, None)
        }
        CurveType::S => {
            let branch = classify_s_branch(geometry, &pair, image_height);
            let (mt, tl) = match branch {
                SBranch::UpperPrimary => s_curve_upper(&matrix, &pair)?,
                SBranch::LowerPrimary => s_curve_lower(&matrix, &pair)?,
            };
            debug!("solve s_branch={branch:?}");
            (mt, tl, Some(branch))
        }
    };

    let records = [primary, main_thoracic, thoracolumbar];
    if let Some(bad) = records.iter().find(|r| !r.angle_degrees.is_finite()) {
        return Err(CobbError::NonFiniteAngle {
            top: bad.top_index,
            bottom: bad.bottom_index,
        });
    }
    Ok(SolverOutput { records, s_branch })
}

/// Decides which half of the image the primary pair sits in.
pub fn classify_s_branch(geometry: &SpineGeometry, pair: &PrimaryPair, image_height: f64) -> SBranch {
    let anchor_sum = geometry.anchor_y(pair.upper) + geometry.anchor_y(pair.lower);
    if anchor_sum < image_height {
        SBranch::UpperPrimary
    } else {
        SBranch::LowerPrimary
    }
}

fn c_curve(matrix: &AngleMatrix, pair: &PrimaryPair) -> (AngleRecord, AngleRecord) {
    let last = matrix.len() - 1;
    let mt = AngleRecord::new(
        AngleKind::MainThoracic,
        matrix.get(0, pair.upper),
        0,
        pair.upper,
    );
    let tl = AngleRecord::new(
        AngleKind::Thoracolumbar,
        matrix.get(last, pair.lower),
        pair.lower,
        last,
    );
    (mt, tl)
}

fn range_max(matrix: &AngleMatrix, pivot: usize, range: Range<usize>) -> Result<RangeMax, CobbError> {
    argmax_angle_in_range(matrix, pivot, range).ok_or(CobbError::EmptySearchRange { pivot })
}

fn s_curve_upper(
    matrix: &AngleMatrix,
    pair: &PrimaryPair,
) -> Result<(AngleRecord, AngleRecord), CobbError> {
    let up = range_max(matrix, pair.upper, 0..pair.upper)?;
    let down = range_max(matrix, pair.lower, pair.lower..matrix.len())?;
    let mt = AngleRecord::new(AngleKind::MainThoracic, up.angle_deg, up.index, pair.upper);
    // one above the partner found; inverted when the partner is `lower` itself
    let tl = AngleRecord::new(
        AngleKind::Thoracolumbar,
        down.angle_deg,
        pair.lower,
        down.index.saturating_sub(1),
    );
    Ok((mt, tl))
}

fn s_curve_lower(
    matrix: &AngleMatrix,
    pair: &PrimaryPair,
) -> Result<(AngleRecord, AngleRecord), CobbError> {
    let up = range_max(matrix, pair.upper, 0..pair.upper)?;
    let upper = range_max(matrix, up.index, 0..up.index + 1)?;
    let mt = AngleRecord::new(AngleKind::MainThoracic, up.angle_deg, up.index, pair.upper);
    let tl = AngleRecord::new(
        AngleKind::Thoracolumbar,
        upper.angle_deg,
        upper.index,
        up.index,
    );
    Ok((mt, tl))
}
