//! Output composition module
//!
//! Maps each output mode to its sequence of scaling and overlay passes.

mod composer;
pub mod mode;

pub use composer::compose;
pub use mode::{ANALYTE_BAND, BASE_BAND, OutputMode};
