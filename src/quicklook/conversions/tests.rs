use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::quicklook::common::error::{QuicklookError, Result};
use crate::quicklook::common::image::RgbImage;
use crate::quicklook::common::plane::Plane;
use crate::quicklook::compose::OutputMode;
use crate::quicklook::config::QuicklookConfig;
use crate::quicklook::conversions::envi_to_quicklook::QuicklookPipeline;
use crate::quicklook::envi::{EnviReader, MemoryRaster, RasterHeader, RasterReader, SampleType};
use crate::quicklook::finish::{FinishError, Finisher, NoopFinisher};
use crate::quicklook::output::{ImageWriter, StandardImageWriter};

struct MockReader {
    should_fail: bool,
    bands: usize,
}

impl RasterReader for MockReader {
    type Source = MemoryRaster;

    fn open(&self, path: &Path) -> Result<MemoryRaster> {
        if self.should_fail || path.to_string_lossy().contains("corrupt") {
            return Err(QuicklookError::Format("Mock header error".to_string()));
        }
        let header = RasterHeader::new(8, 8, self.bands, SampleType::Float32);
        let bands = (0..self.bands)
            .map(|band| {
                let data = (0..64).map(|i| (i + 1) as f64 * (band + 1) as f64 * 10.0).collect();
                Plane::new(8, 8, data).unwrap()
            })
            .collect();
        MemoryRaster::new(header, bands)
    }
}

struct MockWriter {
    should_fail: bool,
    written: Arc<Mutex<Vec<RgbImage>>>,
}

impl ImageWriter for MockWriter {
    fn write_image(&self, image: &RgbImage, output: &mut dyn Write, _config: &QuicklookConfig) -> Result<()> {
        if self.should_fail {
            return Err(QuicklookError::EncodeError("Mock encode error".to_string()));
        }
        output.write_all(b"mock image")?;
        self.written.lock().unwrap().push(image.clone());
        Ok(())
    }
}

struct RecordingFinisher {
    should_fail: bool,
    seen: Arc<Mutex<Vec<PathBuf>>>,
}

impl Finisher for RecordingFinisher {
    fn finish(&self, image_path: &Path) -> std::result::Result<Vec<PathBuf>, FinishError> {
        self.seen.lock().unwrap().push(image_path.to_path_buf());
        if self.should_fail {
            return Err(FinishError::Failed {
                step: "transparency",
                code: Some(1),
                stderr: "mock failure".to_string(),
            });
        }
        Ok(vec![image_path.with_extension("x8000.png")])
    }
}

fn mock_pipeline(
    reader_fails: bool,
    writer_fails: bool,
    finisher_fails: bool,
) -> (
    QuicklookPipeline<MockReader, MockWriter, RecordingFinisher>,
    Arc<Mutex<Vec<RgbImage>>>,
    Arc<Mutex<Vec<PathBuf>>>,
) {
    let written = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::new(Mutex::new(Vec::new()));
    let pipeline = QuicklookPipeline::with_custom(
        MockReader { should_fail: reader_fails, bands: 4 },
        MockWriter { should_fail: writer_fails, written: written.clone() },
        RecordingFinisher { should_fail: finisher_fails, seen: seen.clone() },
        QuicklookConfig::default(),
    );
    (pipeline, written, seen)
}

#[test]
fn test_config_builder() {
    let config = QuicklookConfig::builder()
        .clip(0.05, 0.95)
        .validate_dimensions(false)
        .max_dimension(Some(10000))
        .share_permissions(true)
        .build();

    assert_eq!(config.low_clip, 0.05);
    assert_eq!(config.high_clip, 0.95);
    assert!(!config.validate_dimensions);
    assert_eq!(config.max_dimension, Some(10000));
    assert!(config.share_permissions);
    assert_eq!(config.overlay.thresholds.len(), 31);
}

#[test]
fn test_successful_conversion() {
    let dir = tempfile::tempdir().unwrap();
    let (pipeline, written, seen) = mock_pipeline(false, false, false);

    let output = pipeline
        .convert_file("/data/ang_cmf_v1g_img", dir.path(), OutputMode::BlueDetections)
        .unwrap();

    let expected = dir.path().join("ang_cmf_v1g_det_blue.png");
    assert_eq!(output.image_path, expected);
    assert_eq!(std::fs::read(&expected).unwrap(), b"mock image");
    assert_eq!(written.lock().unwrap().len(), 1);
    assert_eq!(written.lock().unwrap()[0].shape(), (8, 8, 3));
    assert_eq!(*seen.lock().unwrap(), vec![expected]);
    assert_eq!(output.finished.unwrap().len(), 1);
}

#[test]
fn test_reader_failure_leaves_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let (pipeline, written, seen) = mock_pipeline(true, false, false);

    let result = pipeline.convert_file("/data/scene_img", dir.path(), OutputMode::Grayscale);

    assert!(matches!(result, Err(QuicklookError::Format(_))));
    assert!(written.lock().unwrap().is_empty());
    assert!(seen.lock().unwrap().is_empty());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_writer_failure_leaves_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let (pipeline, _written, seen) = mock_pipeline(false, true, false);

    let result = pipeline.convert_file("/data/scene_img", dir.path(), OutputMode::FullColor);

    assert!(matches!(result, Err(QuicklookError::EncodeError(_))));
    assert!(seen.lock().unwrap().is_empty());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_finisher_failure_is_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let (pipeline, _written, _seen) = mock_pipeline(false, false, true);

    let output = pipeline
        .convert_file("/data/scene_img", dir.path(), OutputMode::AnalyteGray)
        .unwrap();

    assert!(output.image_path.exists());
    assert!(matches!(output.finished, Err(FinishError::Failed { .. })));
}

#[test]
fn test_missing_output_dir_is_write_error() {
    let dir = tempfile::tempdir().unwrap();
    let (pipeline, _written, _seen) = mock_pipeline(false, false, false);

    let result = pipeline.convert_file("/data/scene_img", dir.path().join("absent"), OutputMode::Grayscale);
    assert!(matches!(result, Err(QuicklookError::OutputWriteError(_))));
}

#[test]
fn test_dimension_validation() {
    let config = QuicklookConfig::builder().max_dimension(Some(4)).build();
    let pipeline = QuicklookPipeline::with_custom(
        MockReader { should_fail: false, bands: 4 },
        StandardImageWriter,
        NoopFinisher,
        config,
    );
    let source = MockReader { should_fail: false, bands: 4 }
        .open(Path::new("scene_img"))
        .unwrap();
    assert!(matches!(
        pipeline.convert(&source, OutputMode::Grayscale),
        Err(QuicklookError::InvalidDimensions(8, 8))
    ));

    let mut pipeline = pipeline;
    pipeline.set_config(QuicklookConfig::builder().validate_dimensions(false).max_dimension(Some(4)).build());
    assert!(pipeline.convert(&source, OutputMode::Grayscale).is_ok());
}

#[test]
fn test_batch_isolates_failures() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = QuicklookPipeline::with_custom(
        MockReader { should_fail: false, bands: 1 },
        StandardImageWriter,
        NoopFinisher,
        QuicklookConfig::default(),
    );

    let inputs = ["/data/a_img", "/data/corrupt_img", "/data/b_img"];
    let results = pipeline.convert_batch(&inputs, dir.path(), OutputMode::Grayscale);
    assert_eq!(results.len(), 3);
    assert!(results[0].1.is_ok());
    assert!(matches!(results[1].1, Err(QuicklookError::Format(_))));
    assert!(results[2].1.is_ok());
    assert!(dir.path().join("a_img_gray.png").exists());
    assert!(dir.path().join("b_img_gray.png").exists());
    assert_eq!(results[2].0, PathBuf::from("/data/b_img"));
    let (_, timings) = results[0].1.as_ref().unwrap();
    assert!(timings.get_step("write_output").is_some());

    // a single-band raster cannot make detection overlays
    let results = pipeline.convert_batch(&inputs[..1], dir.path(), OutputMode::ColorDetections);
    assert!(matches!(results[0].1, Err(QuicklookError::InsufficientBands { .. })));
}

/// Writes a 4x4, 4-band Int16 BIP raster and its header.
fn write_cmf_fixture(dir: &Path, name: &str) -> PathBuf {
    let mut bytes = Vec::new();
    for row in 0..4i16 {
        for col in 0..4i16 {
            let ramp = (row - 1) * 4 + col + 1;
            let visible = if row == 0 { [-9999; 3] } else { [ramp, ramp * 2, ramp * 3] };
            // below the lowest detection threshold, so nothing is painted
            let analyte = if row >= 2 { 400 } else { 0 };
            for value in visible.into_iter().chain([analyte]) {
                bytes.extend_from_slice(&value.to_le_bytes());
            }
        }
    }
    let raster = dir.join(name);
    std::fs::write(&raster, bytes).unwrap();
    std::fs::write(
        dir.join(format!("{}.hdr", name)),
        "ENVI\nsamples = 4\nlines = 4\nbands = 4\ndata type = 2\ninterleave = bip\nbyte order = 0\n",
    )
    .unwrap();
    raster
}

#[test]
fn test_end_to_end_png_for_every_mode() {
    let dir = tempfile::tempdir().unwrap();
    let raster = write_cmf_fixture(dir.path(), "ang_cmf_v1g_img");
    let pipeline = QuicklookPipeline::new(QuicklookConfig::builder().clip(0.0, 1.0).build());

    for mode in OutputMode::ALL {
        let (output, timings) = pipeline
            .convert_file_with_timings(&raster, dir.path(), mode)
            .unwrap();
        assert!(timings.get_step("compose").is_some());

        let decoder = png::Decoder::new(std::fs::File::open(&output.image_path).unwrap());
        let mut reader = decoder.read_info().unwrap();
        let mut pixels = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut pixels).unwrap();
        assert_eq!((info.width, info.height), (4, 4), "mode {}", mode);
        assert_eq!(info.color_type, png::ColorType::Rgb);
        // the sentinel row stays black in every product
        assert!(pixels[..12].iter().all(|&v| v == 0), "mode {}", mode);
    }
}

#[test]
fn test_end_to_end_grayscale_values() {
    let dir = tempfile::tempdir().unwrap();
    let raster = write_cmf_fixture(dir.path(), "scene_img");
    let pipeline = QuicklookPipeline::new(QuicklookConfig::builder().clip(0.0, 1.0).build());

    let source = EnviReader.open(&raster).unwrap();
    let image = pipeline.convert(&source, OutputMode::Grayscale).unwrap();

    assert_eq!(image.pixel(0, 3), [0, 0, 0]);
    assert_eq!(image.pixel(1, 0), [1, 1, 1]);
    assert_eq!(image.pixel(3, 3), [255, 255, 255]);
}

#[test]
fn test_truncated_raster_fails_before_output() {
    let dir = tempfile::tempdir().unwrap();
    let raster = write_cmf_fixture(dir.path(), "scene_img");
    let bytes = std::fs::read(&raster).unwrap();
    std::fs::write(&raster, &bytes[..bytes.len() - 2]).unwrap();

    let out_dir = tempfile::tempdir().unwrap();
    let pipeline = QuicklookPipeline::new(QuicklookConfig::default());
    let result = pipeline.convert_file(&raster, out_dir.path(), OutputMode::Grayscale);

    assert!(matches!(result, Err(QuicklookError::TruncatedRaster { expected: 128, actual: 126 })));
    assert_eq!(std::fs::read_dir(out_dir.path()).unwrap().count(), 0);
}
