//! Post-processing of raw keypoint-detector output.
//!
//! The detector itself is an external collaborator: it is modelled by the
//! [`KeypointDetector`] capability and never constructed by this crate. What
//! lives here is the deterministic part: confidence gating, greedy box
//! suppression and the top-to-bottom ordering every downstream index relies on.

pub mod filter;
pub mod nms;

pub use filter::{filter_detections, FilteredDetections};
pub use nms::{greedy_nms, nms_keep_indices};

use crate::types::Detection;
use image::DynamicImage;

/// Something that finds vertebra instances on a radiograph.
pub trait KeypointDetector {
    type Error: std::fmt::Display;

    fn detect(&mut self, image: &DynamicImage) -> Result<Vec<Detection>, Self::Error>;
}

/// Detector stand-in that replays detections computed elsewhere, e.g. loaded
/// from a JSON dump of the model output.
#[derive(Clone, Debug, Default)]
pub struct PrecomputedDetections {
    detections: Vec<Detection>,
}

impl PrecomputedDetections {
    pub fn new(detections: Vec<Detection>) -> Self {
        Self { detections }
    }
}

impl KeypointDetector for PrecomputedDetections {
    type Error = std::convert::Infallible;

    fn detect(&mut self, _image: &DynamicImage) -> Result<Vec<Detection>, Self::Error> {
        Ok(self.detections.clone())
    }
}
