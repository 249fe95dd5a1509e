use crate::bbox::{BBox, Ltrb};
use nalgebra as na;

/// A confirmed track as reported for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub track_id: u64,
    pub class: i32,
    pub confidence: f32,
    pub bbox: BBox<Ltrb>,
}

impl Track {
    #[inline]
    pub fn centroid(&self) -> na::Point2<f32> {
        self.bbox.centroid()
    }
}
