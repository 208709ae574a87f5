use crate::quicklook::common::error::{QuicklookError, Result};
use crate::quicklook::common::plane::Plane;

/// Physical range mapped onto the display range by [`enhance_layer`].
pub const ENHANCE_FLOOR: f64 = 1.0;
pub const ENHANCE_CEILING: f64 = 2000.0;

const DISPLAY_MIN: f64 = 1.0;
const DISPLAY_MAX: f64 = 255.0;

/// Fixed-range enhancement of a layer with a stable dynamic range.
///
/// `plane` is clipped to `[1, 2000]` and scaled by `255 / 2000`. Cells where
/// `mask_plane` holds no-data are zeroed, so one band can be masked by the
/// coverage of another.
pub fn enhance_layer(plane: Plane, mask_plane: &Plane) -> Result<Plane> {
    if plane.shape() != mask_plane.shape() {
        return Err(QuicklookError::ShapeMismatch {
            expected: plane.shape(),
            actual: mask_plane.shape(),
        });
    }
    let mask = mask_plane.nodata_mask();

    Ok(plane
        .map(|v| v.clamp(ENHANCE_FLOOR, ENHANCE_CEILING))
        .map(|v| v * DISPLAY_MAX / ENHANCE_CEILING)
        .map(|v| v.clamp(DISPLAY_MIN, DISPLAY_MAX))
        .apply_mask(&mask))
}
