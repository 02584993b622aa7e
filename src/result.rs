//! Caller-facing result of one Cobb angle computation.
//!
//! Only plain floats, indices and midline endpoints leave the solver; nothing
//! here refers back to solver-internal matrices.
use crate::midline::Midline;
use crate::shape::CurveType;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AngleKind {
    Primary,
    MainThoracic,
    Thoracolumbar,
}

impl AngleKind {
    pub const ALL: [AngleKind; 3] = [
        AngleKind::Primary,
        AngleKind::MainThoracic,
        AngleKind::Thoracolumbar,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AngleKind::Primary => "PT",
            AngleKind::MainThoracic => "MT",
            AngleKind::Thoracolumbar => "TL",
        }
    }
}

/// Which S-curve sub-search produced the secondary angles.
///
/// In `LowerPrimary` the Thoracolumbar slot holds the angle found above the
/// MainThoracic segment, so its bounds sit nearer the top of the spine than
/// the slot name suggests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SBranch {
    /// Primary pair sits in the upper half of the image.
    UpperPrimary,
    /// Primary pair sits in the lower half of the image.
    LowerPrimary,
}

/// One Cobb angle and the two vertebrae bounding it.
///
/// `top_index <= bottom_index` is not guaranteed. In the upper-half S search
/// the Thoracolumbar bottom bound is reported one position above the partner
/// found, so it lands above `top_index` when that partner is the top vertebra
/// itself. Use [`AngleRecord::ordered_bounds`] when drawing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AngleRecord {
    pub kind: AngleKind,
    pub angle_degrees: f64,
    pub top_index: usize,
    pub bottom_index: usize,
}

impl AngleRecord {
    pub fn new(kind: AngleKind, angle_degrees: f64, top_index: usize, bottom_index: usize) -> Self {
        Self {
            kind,
            angle_degrees,
            top_index,
            bottom_index,
        }
    }

    /// `(top_index, bottom_index)` sorted ascending.
    pub fn ordered_bounds(&self) -> (usize, usize) {
        if self.top_index <= self.bottom_index {
            (self.top_index, self.bottom_index)
        } else {
            (self.bottom_index, self.top_index)
        }
    }

    /// Angle rounded to one decimal for display.
    pub fn rounded_degrees(&self) -> f64 {
        (self.angle_degrees * 10.0).round() / 10.0
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CobbResult {
    /// Always ordered Primary, MainThoracic, Thoracolumbar.
    pub angles: [AngleRecord; 3],
    pub curve_type: CurveType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s_branch: Option<SBranch>,
    pub midlines: Vec<Midline>,
}

impl CobbResult {
    pub fn record(&self, kind: AngleKind) -> &AngleRecord {
        match kind {
            AngleKind::Primary => &self.angles[0],
            AngleKind::MainThoracic => &self.angles[1],
            AngleKind::Thoracolumbar => &self.angles[2],
        }
    }

    pub fn primary(&self) -> &AngleRecord {
        self.record(AngleKind::Primary)
    }

    /// The three angle values in record order.
    pub fn cobb_angles(&self) -> [f64; 3] {
        self.angles.map(|r| r.angle_degrees)
    }

    pub fn vertebra_count(&self) -> usize {
        self.midlines.len()
    }
}

impl std::fmt::Display for CobbResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "curve={}", self.curve_type)?;
        for r in &self.angles {
            write!(
                f,
                " {}={:.1}° [{}-{}]",
                r.kind.label(),
                r.rounded_degrees(),
                r.top_index,
                r.bottom_index
            )?;
        }
        Ok(())
    }
}

/// Packs solver records, curve type and midlines into a [`CobbResult`].
pub fn assemble(
    records: [AngleRecord; 3],
    curve_type: CurveType,
    s_branch: Option<SBranch>,
    midlines: Vec<Midline>,
) -> CobbResult {
    let mut angles = records;
    angles.sort_by_key(|r| match r.kind {
        AngleKind::Primary => 0,
        AngleKind::MainThoracic => 1,
        AngleKind::Thoracolumbar => 2,
    });
    CobbResult {
        angles,
        curve_type,
        s_branch,
        midlines,
    }
}
