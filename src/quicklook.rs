//! Quicklook pipeline module
//!
//! Converts 4-band ENVI matched-filter rasters into 8-bit RGB quicklooks,
//! with separate modules for raster reading, radiometric scaling, detection
//! overlays, composition, encoding and finishing.

pub mod common;
pub mod compose;
pub mod config;
pub mod conversions;
pub mod envi;
pub mod finish;
pub mod output;
pub mod overlay;
pub mod scale;

pub use common::{
    NODATA,
    PipelineTimings,
    Plane,
    QuicklookError,
    Result,
    RgbImage,
};

pub use envi::{
    BandSource,
    EnviReader,
    MemoryRaster,
    Raster,
    RasterHeader,
    RasterReader,
    SampleType,
};

pub use config::{
    QuicklookConfig,
    QuicklookConfigBuilder,
};

pub use output::{
    ImageWriter,
    OutputFormat,
    StandardImageWriter,
    TiffCompression,
};

pub use compose::{
    OutputMode,
    compose,
};

pub use finish::{
    FinishError,
    Finisher,
    ImageMagickFinisher,
    NoopFinisher,
};

pub use conversions::{
    QuicklookOutput,
    QuicklookPipeline,
};
