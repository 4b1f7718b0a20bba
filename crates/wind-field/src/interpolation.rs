//! Bilinear interpolation within a single source cell.

/// Bilinear interpolation.
///
/// `x_along` and `y_along` are offsets in `[0, 1]` from the top-left corner.
/// Evaluated as two horizontal lerps followed by a vertical one, so the
/// result stays within the range of the corners: equal corners come back
/// unchanged and a saturated channel never rounds past 255.
#[inline]
pub fn bilinear(x_along: f64, y_along: f64, v11: f64, v21: f64, v12: f64, v22: f64) -> f64 {
    let top = v11 + (v21 - v11) * x_along;
    let bottom = v12 + (v22 - v12) * x_along;
    top + (bottom - top) * y_along
}
