#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod error;
pub mod estimator;
pub mod params;
pub mod result;
pub mod types;

// Stage modules, public so each step can be run and tested on its own.
pub mod angle;
pub mod detection;
pub mod landmarks;
pub mod midline;
pub mod shape;
pub mod solver;

// Tooling around the core.
pub mod config;
pub mod diagnostics;
pub mod io;
pub mod overlay;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::CobbError;
pub use crate::estimator::{AnalyzeError, CobbEstimator};
pub use crate::params::EstimatorParams;
pub use crate::result::{AngleKind, AngleRecord, CobbResult, SBranch};
pub use crate::shape::CurveType;

pub use crate::diagnostics::EstimateReport;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use cobb_angle::prelude::*;
///
/// let detections: Vec<Detection> = Vec::new();
/// let est = CobbEstimator::new(EstimatorParams::default());
/// let err = est.estimate(&detections, 1024.0).unwrap_err();
/// println!("{}", err.user_message());
/// ```
pub mod prelude {
    pub use crate::types::{BoundingBox, Detection, Point2, VertebraKeypoints, VertebraSequence};
    pub use crate::{AngleKind, CobbError, CobbEstimator, CobbResult, CurveType, EstimatorParams};
}
