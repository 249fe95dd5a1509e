use serde_derive::{Deserialize, Serialize};

use crate::bbox::{BBox, Ltrb};

/// Contains left-top (x1,y1) and right-bottom (x2,y2) corners of bbox in pixels
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    #[serde(rename = "p")]
    pub confidence: f32,
    #[serde(rename = "c")]
    pub class: i32,
}

impl Detection {
    #[inline]
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32, confidence: f32, class: i32) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            confidence,
            class,
        }
    }

    #[inline]
    pub fn iou(&self, other: &Detection) -> f32 {
        self.bbox().iou(&other.bbox())
    }

    #[inline(always)]
    pub fn bbox(&self) -> BBox<Ltrb> {
        BBox::ltrb(self.x1, self.y1, self.x2, self.y2)
    }
}

impl From<[f32; 6]> for Detection {
    /// `[x1, y1, x2, y2, confidence, class]`, the detector's tuple layout.
    fn from(v: [f32; 6]) -> Self {
        Self::new(v[0], v[1], v[2], v[3], v[4], v[5] as i32)
    }
}
