//! Radiometric scaling module
//!
//! Turns single-band planes into 8-bit display planes, either with a
//! per-image percentile stretch or with a fixed physical range.

mod enhance;
mod linear;

pub use enhance::{ENHANCE_CEILING, ENHANCE_FLOOR, enhance_layer};
pub use linear::{DEFAULT_HIGH_CLIP, DEFAULT_LOW_CLIP, linear_scale, stretch_thresholds};
