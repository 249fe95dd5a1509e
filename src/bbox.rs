use nalgebra as na;
use serde_derive::{Deserialize, Serialize};
use std::marker::PhantomData;

pub trait BBoxFormat: std::fmt::Debug {}

/// Left-top-right-bottom format, contains left top and right bottom corners
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct Ltrb;
impl BBoxFormat for Ltrb {}

/// X-y-width-height format, contains coordinates of the center of bbox and width-height
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct Xywh;
impl BBoxFormat for Xywh {}

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct BBox<F: BBoxFormat>([f32; 4], PhantomData<F>);

impl<F: BBoxFormat> From<BBox<F>> for [f32; 4] {
    fn from(bbox: BBox<F>) -> Self {
        bbox.0
    }
}

impl BBox<Ltrb> {
    #[inline]
    pub fn ltrb(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        BBox([x1, y1, x2, y2], PhantomData)
    }

    #[inline]
    pub fn as_xywh(&self) -> BBox<Xywh> {
        self.into()
    }

    #[inline(always)]
    pub fn left(&self) -> f32 {
        self.0[0]
    }

    #[inline(always)]
    pub fn top(&self) -> f32 {
        self.0[1]
    }

    #[inline(always)]
    pub fn right(&self) -> f32 {
        self.0[2]
    }

    #[inline(always)]
    pub fn bottom(&self) -> f32 {
        self.0[3]
    }

    /// Signed area, negative for inverted boxes.
    #[inline]
    pub fn area(&self) -> f32 {
        (self.right() - self.left()) * (self.bottom() - self.top())
    }

    #[inline]
    pub fn centroid(&self) -> na::Point2<f32> {
        let c = self.as_xywh();

        na::Point2::new(c.cx(), c.cy())
    }

    /// Intersection over union, always within `[0, 1]`.
    ///
    /// Disjoint, touching, degenerate or inverted boxes give `0.0`, as does
    /// anything involving NaN coordinates.
    pub fn iou(&self, other: &BBox<Ltrb>) -> f32 {
        let i_w = self.right().min(other.right()) - self.left().max(other.left());
        let i_h = self.bottom().min(other.bottom()) - self.top().max(other.top());

        if !(i_w > 0.0 && i_h > 0.0) {
            return 0.0;
        }

        let i_area = i_w * i_h;
        let union = self.area() + other.area() - i_area;

        if !(union > 0.0) {
            return 0.0;
        }

        let iou = i_area / union;
        if iou.is_finite() {
            iou.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

impl BBox<Xywh> {
    #[inline]
    pub fn xywh(cx: f32, cy: f32, w: f32, h: f32) -> Self {
        BBox([cx, cy, w, h], PhantomData)
    }

    #[inline]
    pub fn as_ltrb(&self) -> BBox<Ltrb> {
        self.into()
    }

    #[inline(always)]
    pub fn cx(&self) -> f32 {
        self.0[0]
    }

    #[inline(always)]
    pub fn cy(&self) -> f32 {
        self.0[1]
    }

    #[inline(always)]
    pub fn width(&self) -> f32 {
        self.0[2]
    }

    #[inline(always)]
    pub fn height(&self) -> f32 {
        self.0[3]
    }
}

impl<'a> From<&'a BBox<Ltrb>> for BBox<Xywh> {
    #[inline]
    fn from(v: &'a BBox<Ltrb>) -> Self {
        Self(
            [
                (v.0[0] + v.0[2]) / 2.0,
                (v.0[1] + v.0[3]) / 2.0,
                v.0[2] - v.0[0],
                v.0[3] - v.0[1],
            ],
            PhantomData,
        )
    }
}

impl<'a> From<&'a BBox<Xywh>> for BBox<Ltrb> {
    #[inline]
    fn from(v: &'a BBox<Xywh>) -> Self {
        let w2 = v.0[2] / 2.0;
        let h2 = v.0[3] / 2.0;

        Self(
            [v.0[0] - w2, v.0[1] - h2, v.0[0] + w2, v.0[1] + h2],
            PhantomData,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_iou_identical_is_one() {
        let a = BBox::ltrb(3.0, 4.0, 17.5, 29.0);
        assert_eq!(a.iou(&a), 1.0);
    }

    #[test]
    fn test_iou_partial_overlap() {
        let a = BBox::ltrb(0.0, 0.0, 10.0, 10.0);
        let b = BBox::ltrb(1.0, 1.0, 11.0, 11.0);

        // 81 / (100 + 100 - 81)
        assert_relative_eq!(a.iou(&b), 81.0 / 119.0, epsilon = 1e-6);
    }

    #[test]
    fn test_iou_is_symmetric() {
        let boxes = [
            BBox::ltrb(0.0, 0.0, 10.0, 10.0),
            BBox::ltrb(5.0, -3.0, 12.0, 4.0),
            BBox::ltrb(2.5, 2.5, 3.5, 9.0),
            BBox::ltrb(-20.0, -20.0, 100.0, 100.0),
            BBox::ltrb(10.0, 10.0, 0.0, 0.0),
        ];

        for a in &boxes {
            for b in &boxes {
                assert_eq!(a.iou(b), b.iou(a));
            }
        }
    }

    #[test]
    fn test_iou_disjoint_and_touching() {
        let a = BBox::ltrb(0.0, 0.0, 10.0, 10.0);

        assert_eq!(a.iou(&BBox::ltrb(20.0, 20.0, 30.0, 30.0)), 0.0);
        assert_eq!(a.iou(&BBox::ltrb(10.0, 0.0, 20.0, 10.0)), 0.0);
        assert_eq!(a.iou(&BBox::ltrb(0.0, 10.0, 10.0, 20.0)), 0.0);
    }

    #[test]
    fn test_iou_degenerate_boxes() {
        let a = BBox::ltrb(0.0, 0.0, 10.0, 10.0);
        let point = BBox::ltrb(5.0, 5.0, 5.0, 5.0);
        let inverted = BBox::ltrb(8.0, 8.0, 2.0, 2.0);
        let nan = BBox::ltrb(f32::NAN, 0.0, 10.0, 10.0);

        assert_eq!(point.iou(&point), 0.0);
        assert_eq!(a.iou(&point), 0.0);
        assert_eq!(a.iou(&inverted), 0.0);
        assert_eq!(inverted.iou(&inverted), 0.0);
        assert!(a.iou(&nan) >= 0.0 && a.iou(&nan) <= 1.0);
    }

    #[test]
    fn test_centroid_and_conversion() {
        let a = BBox::ltrb(10.0, 20.0, 30.0, 60.0);
        let c = a.centroid();

        assert_relative_eq!(c.x, 20.0);
        assert_relative_eq!(c.y, 40.0);

        let xywh = a.as_xywh();
        assert_relative_eq!(xywh.width(), 20.0);
        assert_relative_eq!(xywh.height(), 40.0);
        assert_eq!(xywh.as_ltrb(), a);
    }
}
