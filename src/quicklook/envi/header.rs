//! ENVI `.hdr` parsing.
//!
//! Header files are short `key = value` documents. Values wrapped in braces
//! may span several lines (band names, wavelengths, map info); they are
//! collected but only the scalar keys below are interpreted.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::debug;

use crate::quicklook::common::error::{QuicklookError, Result};
use crate::quicklook::envi::types::{ByteOrder, Interleave, RasterHeader, SampleType};

/// Suffix appended to the raster path to locate its header.
pub const HEADER_SUFFIX: &str = ".hdr";

/// `<raster path>.hdr`
pub fn header_path(raster_path: &Path) -> PathBuf {
    let mut name = raster_path.as_os_str().to_owned();
    name.push(HEADER_SUFFIX);
    PathBuf::from(name)
}

/// Reads and parses the header at `path`.
pub fn read_header<P: AsRef<Path>>(path: P) -> Result<RasterHeader> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| {
        QuicklookError::InputReadError(format!("{}: {}", path.display(), e))
    })?;
    let header = text.parse::<RasterHeader>()?;
    debug!(
        path = %path.display(),
        lines = header.lines,
        samples = header.samples,
        bands = header.bands,
        sample_type = ?header.sample_type,
        "Parsed ENVI header"
    );
    Ok(header)
}

/// Splits header text into lowercase keys and raw values.
fn parse_fields(text: &str) -> HashMap<String, String> {
    let mut fields = HashMap::new();
    let mut lines = text.lines();

    while let Some(line) = lines.next() {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim().to_ascii_lowercase();
        let mut value = value.trim().to_string();

        if value.starts_with('{') {
            while !value.contains('}') {
                match lines.next() {
                    Some(next) => {
                        value.push(' ');
                        value.push_str(next.trim());
                    }
                    None => break,
                }
            }
        }
        fields.insert(key, value);
    }
    fields
}

fn required_int(fields: &HashMap<String, String>, key: &str) -> Result<i64> {
    let raw = fields
        .get(key)
        .ok_or_else(|| QuicklookError::Format(format!("missing '{}'", key)))?;
    raw.parse::<i64>()
        .map_err(|_| QuicklookError::Format(format!("'{}' is not an integer: {}", key, raw)))
}

fn optional_int(fields: &HashMap<String, String>, key: &str) -> Result<Option<i64>> {
    match fields.get(key) {
        Some(_) => required_int(fields, key).map(Some),
        None => Ok(None),
    }
}

fn positive_dimension(fields: &HashMap<String, String>, key: &str) -> Result<usize> {
    let value = required_int(fields, key)?;
    if value <= 0 {
        return Err(QuicklookError::Format(format!(
            "'{}' must be positive, got {}",
            key, value
        )));
    }
    Ok(value as usize)
}

impl FromStr for RasterHeader {
    type Err = QuicklookError;

    fn from_str(text: &str) -> Result<Self> {
        let fields = parse_fields(text);

        let lines = positive_dimension(&fields, "lines")?;
        let samples = positive_dimension(&fields, "samples")?;
        let bands = positive_dimension(&fields, "bands")?;
        let sample_type = SampleType::from_code(required_int(&fields, "data type")?)?;

        let interleave = match fields.get("interleave") {
            Some(value) => Interleave::parse(value)?,
            None => Interleave::default(),
        };
        let byte_order = match optional_int(&fields, "byte order")? {
            Some(code) => ByteOrder::from_code(code)?,
            None => ByteOrder::default(),
        };
        let header_offset = match optional_int(&fields, "header offset")? {
            Some(offset) if offset >= 0 => offset as u64,
            Some(offset) => {
                return Err(QuicklookError::Format(format!(
                    "negative header offset {}",
                    offset
                )));
            }
            None => 0,
        };

        let header = RasterHeader {
            lines,
            samples,
            bands,
            sample_type,
            interleave,
            byte_order,
            header_offset,
        };
        header.file_len()?;
        Ok(header)
    }
}
