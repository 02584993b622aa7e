//! Failure modes of the landmark-to-angle computation.
//!
//! None of these are fatal: each is reported to the caller, which decides
//! whether to retry with another image, skip the case, or show a message.

/// Message shown to end users for every failure kind.
pub const USER_FAILURE_MESSAGE: &str = "Could not measure Cobb angles on this image.";

#[derive(Clone, Debug, PartialEq)]
pub enum CobbError {
    /// Nothing survived confidence filtering and suppression.
    NoKeypointsDetected,
    /// Fewer than two vertebrae, so no pair of tilts exists.
    InsufficientVertebrae { found: usize },
    /// Tilt vector of this vertebra has zero length (e.g. duplicated corners).
    DegenerateVertebra { index: usize },
    /// A corner coordinate of this vertebra is NaN or infinite.
    NonFiniteKeypoint { index: usize },
    /// The S-test ratio is undefined for this midpoint series.
    UndefinedShapeTest { reason: ShapeTestFailure },
    /// An angle computation produced NaN or infinity.
    NonFiniteAngle { top: usize, bottom: usize },
    /// An S-curve search anchored at `pivot` had no vertebra above it to pair
    /// with, e.g. when the primary curve starts at the first vertebra.
    EmptySearchRange { pivot: usize },
    /// Flattened landmark list whose length is not a multiple of eight.
    MalformedLandmarks { len: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeTestFailure {
    /// First and last midpoints share an x coordinate.
    ZeroHorizontalSpan,
    /// First and last midpoints share a y coordinate.
    ZeroVerticalSpan,
    NonFiniteDeviation { index: usize },
}

impl CobbError {
    /// Single user-facing category for all failure kinds.
    pub fn user_message(&self) -> &'static str {
        match self {
            CobbError::NoKeypointsDetected => "No keypoints detected in the image.",
            _ => USER_FAILURE_MESSAGE,
        }
    }
}

impl std::fmt::Display for ShapeTestFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShapeTestFailure::ZeroHorizontalSpan => {
                write!(f, "first and last midpoints have equal x")
            }
            ShapeTestFailure::ZeroVerticalSpan => {
                write!(f, "first and last midpoints have equal y")
            }
            ShapeTestFailure::NonFiniteDeviation { index } => {
                write!(f, "deviation at midpoint {index} is not finite")
            }
        }
    }
}

impl std::fmt::Display for CobbError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CobbError::NoKeypointsDetected => write!(f, "no keypoints detected"),
            CobbError::InsufficientVertebrae { found } => {
                write!(f, "insufficient vertebrae ({found} < 2)")
            }
            CobbError::DegenerateVertebra { index } => {
                write!(f, "vertebra {index} has a zero-length tilt vector")
            }
            CobbError::NonFiniteKeypoint { index } => {
                write!(f, "vertebra {index} has a non-finite keypoint")
            }
            CobbError::UndefinedShapeTest { reason } => {
                write!(f, "curve shape test undefined: {reason}")
            }
            CobbError::NonFiniteAngle { top, bottom } => {
                write!(f, "angle between vertebrae {top} and {bottom} is not finite")
            }
            CobbError::EmptySearchRange { pivot } => {
                write!(f, "no vertebra above {pivot} to bound the secondary curve")
            }
            CobbError::MalformedLandmarks { len } => {
                write!(f, "landmark list of length {len} is not a multiple of 8")
            }
        }
    }
}

impl std::error::Error for CobbError {}
