use serde::{Deserialize, Serialize};

pub type Point2 = nalgebra::Point2<f64>;
pub type Vector2 = nalgebra::Vector2<f64>;

/// Axis-aligned detection box in image pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BoundingBox {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl BoundingBox {
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    /// Box area; inverted boxes count as empty.
    pub fn area(&self) -> f64 {
        (self.xmax - self.xmin).max(0.0) * (self.ymax - self.ymin).max(0.0)
    }

    /// Intersection-over-union with `other`, 0 when the union is empty.
    pub fn iou(&self, other: &BoundingBox) -> f64 {
        let x1 = self.xmin.max(other.xmin);
        let y1 = self.ymin.max(other.ymin);
        let x2 = self.xmax.min(other.xmax);
        let y2 = self.ymax.min(other.ymax);

        let intersection = (x2 - x1).max(0.0) * (y2 - y1).max(0.0);
        let union = self.area() + other.area() - intersection;
        if union > 0.0 {
            intersection / union
        } else {
            0.0
        }
    }
}

impl From<[f64; 4]> for BoundingBox {
    fn from(v: [f64; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<BoundingBox> for [f64; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.xmin, b.ymin, b.xmax, b.ymax]
    }
}

/// The four corner landmarks of one vertebra in detector order.
///
/// Midline construction pairs `corners[0]`–`corners[2]` and
/// `corners[1]`–`corners[3]`, so the order is significant.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VertebraKeypoints {
    pub corners: [Point2; 4],
}

impl VertebraKeypoints {
    pub fn new(corners: [Point2; 4]) -> Self {
        Self { corners }
    }

    pub fn from_xy(xy: [[f64; 2]; 4]) -> Self {
        Self {
            corners: xy.map(|p| Point2::new(p[0], p[1])),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.corners
            .iter()
            .all(|p| p.x.is_finite() && p.y.is_finite())
    }
}

/// One raw instance reported by the external keypoint detector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    #[serde(rename = "box")]
    pub bbox: BoundingBox,
    pub score: f64,
    pub keypoints: VertebraKeypoints,
}

/// Vertebrae ordered top-to-bottom along the spine.
///
/// Every index reported by the solver refers to a position in this sequence,
/// which is why it exposes no way to reorder its elements.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VertebraSequence(Vec<VertebraKeypoints>);

impl VertebraSequence {
    pub fn new(vertebrae: Vec<VertebraKeypoints>) -> Self {
        Self(vertebrae)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[VertebraKeypoints] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VertebraKeypoints> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<VertebraKeypoints> {
        self.0
    }
}

impl From<Vec<VertebraKeypoints>> for VertebraSequence {
    fn from(v: Vec<VertebraKeypoints>) -> Self {
        Self(v)
    }
}

impl<'a> IntoIterator for &'a VertebraSequence {
    type Item = &'a VertebraKeypoints;
    type IntoIter = std::slice::Iter<'a, VertebraKeypoints>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
