//! Detection records.

/// Axis-aligned box with a class label and confidence.
///
/// Coordinates are in whichever space is current: padded letterbox pixels
/// after decoding, original image pixels after remapping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Detection {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    pub w: f32,
    pub h: f32,
    /// Class index into the label table.
    pub label: usize,
    /// Combined objectness and class confidence.
    pub prob: f32,
}

impl Detection {
    /// Right edge.
    #[inline]
    pub fn x1(&self) -> f32 {
        self.x + self.w
    }

    /// Bottom edge.
    #[inline]
    pub fn y1(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.w * self.h
    }

    /// Overlap area with `other`, zero when disjoint on either axis.
    #[inline]
    pub fn intersection_area(&self, other: &Detection) -> f32 {
        if self.x > other.x1() || self.x1() < other.x || self.y > other.y1() || self.y1() < other.y
        {
            return 0.0;
        }
        let inter_w = self.x1().min(other.x1()) - self.x.max(other.x);
        let inter_h = self.y1().min(other.y1()) - self.y.max(other.y);
        inter_w * inter_h
    }

    /// Intersection over union; zero when the union is empty.
    #[inline]
    pub fn iou(&self, other: &Detection) -> f32 {
        let inter = self.intersection_area(other);
        let union = self.area() + other.area() - inter;
        if union > 0.0 {
            inter / union
        } else {
            0.0
        }
    }
}

/// Final detection with its class name resolved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabeledDetection {
    pub detection: Detection,
    pub name: &'static str,
}
