use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuicklookError {
    #[error("Invalid ENVI header: {0}")]
    Format(String),

    #[error("Raster is truncated: expected at least {expected} bytes, found {actual}")]
    TruncatedRaster { expected: u64, actual: u64 },

    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to encode image: {0}")]
    EncodeError(String),

    #[error("No strictly positive samples to derive a stretch from")]
    EmptyPopulation,

    #[error("Stretch range is degenerate: low and high thresholds are both {0}")]
    DegenerateRange(f64),

    #[error("Invalid clip fractions: low={low}, high={high}")]
    InvalidClip { low: f64, high: f64 },

    #[error("Plane shapes differ: {expected:?} vs {actual:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Buffer holds {actual} cells, shape needs {expected}")]
    BufferLength { expected: usize, actual: usize },

    #[error("Index out of bounds: row={row}, col={col}, band={band}")]
    IndexOutOfBounds { row: usize, col: usize, band: usize },

    #[error("Mode {mode} needs {required} bands, raster has {available}")]
    InsufficientBands {
        mode: &'static str,
        required: usize,
        available: usize,
    },

    #[error("Invalid image dimensions: lines={0}, samples={1}")]
    InvalidDimensions(usize, usize),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Unsupported output mode: {0}")]
    UnsupportedMode(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, QuicklookError>;
