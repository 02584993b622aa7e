//! I/O helpers for detection dumps, images and JSON reports.
//!
//! - `load_detections`: read detections from JSON, either as a list of
//!   records or in the detector's parallel-array layout.
//! - `load_image` / `image_height`: decode or probe a radiograph.
//! - `write_json_file`: pretty-print a serializable value to disk.
use crate::types::{BoundingBox, Detection, VertebraKeypoints};
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Detector output in one of the two accepted layouts.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum DetectionsFile {
    Records { detections: Vec<Detection> },
    Raw(RawDetections),
}

/// Parallel arrays as emitted by a keypoint R-CNN: one box, score and list of
/// per-corner `[x, y]` or `[x, y, visibility]` entries per instance.
#[derive(Debug, Deserialize)]
pub struct RawDetections {
    pub boxes: Vec<[f64; 4]>,
    pub scores: Vec<f64>,
    pub keypoints: Vec<Vec<Vec<f64>>>,
}

impl RawDetections {
    pub fn into_detections(self) -> Result<Vec<Detection>, String> {
        let n = self.boxes.len();
        if self.scores.len() != n || self.keypoints.len() != n {
            return Err(format!(
                "Mismatched detector arrays: boxes={n} scores={} keypoints={}",
                self.scores.len(),
                self.keypoints.len()
            ));
        }
        self.boxes
            .into_iter()
            .zip(self.scores)
            .zip(self.keypoints)
            .enumerate()
            .map(|(idx, ((bbox, score), kps))| -> Result<Detection, String> {
                Ok(Detection {
                    bbox: BoundingBox::from(bbox),
                    score,
                    keypoints: parse_corners(idx, &kps)?,
                })
            })
            .collect()
    }
}

fn parse_corners(idx: usize, kps: &[Vec<f64>]) -> Result<VertebraKeypoints, String> {
    if kps.len() != 4 {
        return Err(format!(
            "Detection {idx} has {} keypoints, expected 4",
            kps.len()
        ));
    }
    let mut xy = [[0.0; 2]; 4];
    for (slot, kp) in xy.iter_mut().zip(kps) {
        if kp.len() < 2 {
            return Err(format!("Detection {idx} has a keypoint with < 2 coordinates"));
        }
        *slot = [kp[0], kp[1]];
    }
    Ok(VertebraKeypoints::from_xy(xy))
}

impl DetectionsFile {
    pub fn into_detections(self) -> Result<Vec<Detection>, String> {
        match self {
            DetectionsFile::Records { detections } => Ok(detections),
            DetectionsFile::Raw(raw) => raw.into_detections(),
        }
    }
}

pub fn parse_detections(json: &str) -> Result<Vec<Detection>, String> {
    let file: DetectionsFile =
        serde_json::from_str(json).map_err(|e| format!("Failed to parse detections: {e}"))?;
    file.into_detections()
}

pub fn load_detections(path: &Path) -> Result<Vec<Detection>, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read detections {}: {e}", path.display()))?;
    parse_detections(&data).map_err(|e| format!("{}: {e}", path.display()))
}

pub fn load_image(path: &Path) -> Result<DynamicImage, String> {
    image::open(path).map_err(|e| format!("Failed to open {}: {e}", path.display()))
}

/// Image height in pixels, read from the header without decoding pixels.
pub fn image_height(path: &Path) -> Result<u32, String> {
    image::image_dimensions(path)
        .map(|(_, h)| h)
        .map_err(|e| format!("Failed to probe {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
