//! Pipeline conversions module
//!
//! Orchestrates raster reading, composition, encoding and finishing.

mod envi_to_quicklook;

#[cfg(test)]
mod tests;

pub use envi_to_quicklook::{QuicklookOutput, QuicklookPipeline};
