use crate::detection::Detection;

pub struct Frame {
    pub index: u64,
    pub dims: (u32, u32),
    pub detections: Vec<Detection>,
    pub timestamp: f32, // in seconds
}

impl Frame {
    #[inline]
    pub fn len(&self) -> usize {
        self.detections.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }

    /// Pixel row of the counting line placed at `position` (fraction of height).
    #[inline]
    pub fn line_y(&self, position: f32) -> f32 {
        (self.dims.1 as f32 * position).floor()
    }
}
