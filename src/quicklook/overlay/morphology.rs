//! Binary morphology on detection masks. Cells outside the grid count as `false`.

use crate::quicklook::overlay::types::{Mask, StructuringElement};

/// A cell survives only if every cell under the element is set.
pub fn erode(mask: &Mask, element: StructuringElement) -> Mask {
    let mut out = Mask::new(mask.lines(), mask.samples());
    for row in 0..mask.lines() {
        for col in 0..mask.samples() {
            let keep = element
                .offsets()
                .iter()
                .all(|&(dr, dc)| mask.get_or_false(row as isize + dr, col as isize + dc));
            out.set(row, col, keep);
        }
    }
    out
}

/// A cell is set if any cell under the reflected element is set.
pub fn dilate(mask: &Mask, element: StructuringElement) -> Mask {
    let mut out = Mask::new(mask.lines(), mask.samples());
    for row in 0..mask.lines() {
        for col in 0..mask.samples() {
            let hit = element
                .offsets()
                .iter()
                .any(|&(dr, dc)| mask.get_or_false(row as isize - dr, col as isize - dc));
            out.set(row, col, hit);
        }
    }
    out
}

/// Erosion followed by dilation: drops specks and thin lines narrower than the element.
pub fn opening(mask: &Mask, element: StructuringElement) -> Mask {
    dilate(&erode(mask, element), element)
}
