//! Shared error, plane, image and timing types for the quicklook pipeline.

pub mod error;
pub mod image;
pub mod plane;
pub mod timing;

pub use error::{QuicklookError, Result};
pub use image::RgbImage;
pub use plane::{NODATA, Plane};
pub use timing::{PipelineTimings, StepTiming, Timer};
