use crate::bbox::{BBox, Ltrb};
use crate::Detection;

use ndarray::prelude::*;

const CONSUMED: f32 = -1.0;

/// Rows are detections, columns are tracks.
pub fn iou_matrix(dets: &[Detection], boxes: &[BBox<Ltrb>]) -> Array2<f32> {
    Array2::from_shape_fn((dets.len(), boxes.len()), |(r, c)| {
        dets[r].bbox().iou(&boxes[c])
    })
}

/// Position and value of the largest entry, first one in row-major order on ties.
fn argmax(mat: ArrayView2<'_, f32>) -> Option<((usize, usize), f32)> {
    let mut best: Option<((usize, usize), f32)> = None;

    for (pos, &value) in mat.indexed_iter() {
        match best {
            Some((_, b)) if value <= b => {}
            _ => best = Some((pos, value)),
        }
    }

    best
}

/// Greedy global assignment over an IoU matrix.
///
/// Repeatedly takes the best remaining pair until it falls below `threshold`
/// or stops overlapping at all,
/// so a row and a column are each used at most once. Returns the matched
/// `(row, column, iou)` triples in the order they were taken and the
/// unmatched rows in ascending order.
pub fn greedy_assignment(
    mut mat: Array2<f32>,
    threshold: f32,
) -> (Vec<(usize, usize, f32)>, Vec<usize>) {
    let (rows, cols) = mat.dim();
    let mut assignments = Vec::with_capacity(rows.min(cols));

    while let Some(((r, c), score)) = argmax(mat.view()) {
        if score < threshold || score <= 0.0 {
            break;
        }

        assignments.push((r, c, score));
        mat.row_mut(r).fill(CONSUMED);
        mat.column_mut(c).fill(CONSUMED);
    }

    let missed = (0..rows)
        .filter(|&r| !assignments.iter().any(|&(x, _, _)| x == r))
        .collect();

    (assignments, missed)
}
