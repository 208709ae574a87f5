use tracing::debug;

use crate::quicklook::common::error::{QuicklookError, Result};
use crate::quicklook::common::plane::Plane;

/// Default fraction of the positive population clipped to black.
pub const DEFAULT_LOW_CLIP: f64 = 0.02;
/// Default fraction of the positive population below full white.
pub const DEFAULT_HIGH_CLIP: f64 = 0.98;

/// Display value reserved for no-data cells.
const MASKED: f64 = 0.0;
/// Lowest value a valid cell may take, so it never reads as transparent.
const DISPLAY_MIN: f64 = 1.0;
const DISPLAY_MAX: f64 = 255.0;

/// Picks the low and high stretch thresholds from the strictly positive cells.
///
/// Ranks are `floor(n * clip)` into the sorted population, clamped to the last
/// element so a clip of `1.0` selects the maximum.
pub fn stretch_thresholds(plane: &Plane, low_clip: f64, high_clip: f64) -> Result<(f64, f64)> {
    if !(0.0..=1.0).contains(&low_clip) || !(0.0..=1.0).contains(&high_clip) || low_clip >= high_clip
    {
        return Err(QuicklookError::InvalidClip {
            low: low_clip,
            high: high_clip,
        });
    }

    let mut population: Vec<f64> = plane.data().iter().copied().filter(|&v| v > 0.0).collect();
    if population.is_empty() {
        return Err(QuicklookError::EmptyPopulation);
    }
    population.sort_by(f64::total_cmp);

    let last = population.len() - 1;
    let rank = |clip: f64| ((population.len() as f64 * clip) as usize).min(last);
    Ok((population[rank(low_clip)], population[rank(high_clip)]))
}

/// Percentile linear stretch of a plane into the 8-bit display range.
///
/// No-data cells come out as 0, every other cell lands in `[1, 255]`.
pub fn linear_scale(plane: Plane, low_clip: f64, high_clip: f64) -> Result<Plane> {
    let mask = plane.nodata_mask();
    let (low, high) = stretch_thresholds(&plane, low_clip, high_clip)?;
    if high == low {
        return Err(QuicklookError::DegenerateRange(low));
    }
    let span = high - low;

    debug!(low, high, "Linear stretch");

    Ok(plane
        .map(|v| if v < low { MASKED } else { v - low })
        .map(|v| v * DISPLAY_MAX / span)
        .map(|v| v.clamp(DISPLAY_MIN, DISPLAY_MAX))
        .apply_mask(&mask))
}
