use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use crate::quicklook::finish::error::FinishError;
use crate::quicklook::finish::finisher::Finisher;

/// Longest edge, in pixels, of the resized copy.
pub const DEFAULT_MAX_EDGE: u32 = 8000;

/// Keys black to transparent and writes a size-bounded copy with ImageMagick `convert`.
#[derive(Debug, Clone)]
pub struct ImageMagickFinisher {
    pub convert_exe: PathBuf,
    pub max_edge: u32,
}

impl Default for ImageMagickFinisher {
    fn default() -> Self {
        Self {
            convert_exe: PathBuf::from("convert"),
            max_edge: DEFAULT_MAX_EDGE,
        }
    }
}

/// One `convert` invocation of the finishing step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertStep {
    pub name: &'static str,
    pub args: Vec<String>,
}

/// Name of the resized copy: `_`-separated parts of the stem starting with `v`
/// (version tags) are dropped and `.x<max_edge>` goes before the extension.
pub fn resized_path(image_path: &Path, max_edge: u32) -> Result<PathBuf, FinishError> {
    let invalid = || FinishError::InvalidPath(image_path.display().to_string());
    let stem = image_path.file_stem().and_then(|s| s.to_str()).ok_or_else(invalid)?;
    let ext = image_path.extension().and_then(|s| s.to_str()).ok_or_else(invalid)?;

    let kept: Vec<&str> = stem.split('_').filter(|part| !part.starts_with('v')).collect();
    if kept.is_empty() {
        return Err(invalid());
    }
    let name = format!("{}.x{}.{}", kept.join("_"), max_edge, ext);
    Ok(image_path.with_file_name(name))
}

impl ImageMagickFinisher {
    pub fn new(convert_exe: impl Into<PathBuf>, max_edge: u32) -> Self {
        Self {
            convert_exe: convert_exe.into(),
            max_edge,
        }
    }

    fn run(&self, step: &'static str, args: &[String]) -> Result<(), FinishError> {
        debug!(step, exe = %self.convert_exe.display(), ?args, "Running finishing command");
        let output = Command::new(&self.convert_exe)
            .args(args)
            .output()
            .map_err(|source| FinishError::Spawn {
                tool: self.convert_exe.display().to_string(),
                source,
            })?;
        if !output.status.success() {
            return Err(FinishError::Failed {
                step,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }

    /// Commands run for `image_path`, in order, and the resized copy they produce.
    ///
    /// The transparency step rewrites the image in place; PNG output is forced
    /// to 32-bit RGBA so the alpha channel survives.
    pub fn steps(&self, image_path: &Path) -> Result<(Vec<ConvertStep>, PathBuf), FinishError> {
        let source = image_path.display().to_string();
        let is_png = image_path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
        let keyed = if is_png {
            format!("PNG32:{}", source)
        } else {
            source.clone()
        };

        let resized = resized_path(image_path, self.max_edge)?;
        let steps = vec![
            ConvertStep {
                name: "transparency",
                args: vec![source.clone(), "-transparent".into(), "black".into(), keyed],
            },
            ConvertStep {
                name: "resize",
                args: vec![
                    source,
                    "-resize".into(),
                    format!("{0}x{0}>", self.max_edge),
                    resized.display().to_string(),
                ],
            },
        ];
        Ok((steps, resized))
    }
}

impl Finisher for ImageMagickFinisher {
    fn finish(&self, image_path: &Path) -> Result<Vec<PathBuf>, FinishError> {
        let (steps, resized) = self.steps(image_path)?;
        for step in &steps {
            self.run(step.name, &step.args)?;
        }

        info!(resized = %resized.display(), "Finished quicklook");
        Ok(vec![resized])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resized_path_drops_version_tags() {
        let path = Path::new("/out/ang20170907t201506_cmf_v1g_det_rgb.png");
        assert_eq!(
            resized_path(path, 8000).unwrap(),
            PathBuf::from("/out/ang20170907t201506_cmf_det_rgb.x8000.png")
        );
    }

    #[test]
    fn test_resized_path_keeps_directory_and_extension() {
        let path = Path::new("/srv/v2/scene_v3_gray.tif");
        assert_eq!(
            resized_path(path, 4096).unwrap(),
            PathBuf::from("/srv/v2/scene_gray.x4096.tif")
        );
    }

    #[test]
    fn test_resized_path_rejects_unusable_names() {
        assert!(matches!(
            resized_path(Path::new("/out/v1.png"), 8000),
            Err(FinishError::InvalidPath(_))
        ));
        assert!(resized_path(Path::new("/out/noext"), 8000).is_err());
    }

    fn args(step: &ConvertStep) -> Vec<&str> {
        step.args.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_png_steps_force_alpha_channel() {
        let finisher = ImageMagickFinisher::default();
        let (steps, resized) = finisher.steps(Path::new("/out/scene_v1_rgb.png")).unwrap();

        assert_eq!(resized, PathBuf::from("/out/scene_rgb.x8000.png"));
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].name, "transparency");
        assert_eq!(
            args(&steps[0]),
            ["/out/scene_v1_rgb.png", "-transparent", "black", "PNG32:/out/scene_v1_rgb.png"]
        );
        assert_eq!(steps[1].name, "resize");
        assert_eq!(
            args(&steps[1]),
            ["/out/scene_v1_rgb.png", "-resize", "8000x8000>", "/out/scene_rgb.x8000.png"]
        );
    }

    #[test]
    fn test_tiff_steps_rewrite_in_place() {
        let finisher = ImageMagickFinisher::new("convert", 2048);
        let (steps, resized) = finisher.steps(Path::new("/out/scene_v2_gray.tif")).unwrap();

        assert_eq!(resized, PathBuf::from("/out/scene_gray.x2048.tif"));
        assert_eq!(
            args(&steps[0]),
            ["/out/scene_v2_gray.tif", "-transparent", "black", "/out/scene_v2_gray.tif"]
        );
        assert!(steps[0].args.iter().all(|arg| !arg.starts_with("PNG32:")));
        assert_eq!(
            args(&steps[1]),
            ["/out/scene_v2_gray.tif", "-resize", "2048x2048>", "/out/scene_gray.x2048.tif"]
        );
    }

    #[test]
    fn test_missing_tool_is_spawn_error() {
        let finisher = ImageMagickFinisher::new("/nonexistent/magick/convert", 8000);
        let result = finisher.finish(Path::new("/tmp/scene_rgb.png"));
        assert!(matches!(result, Err(FinishError::Spawn { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_status_reported() {
        let ok = ImageMagickFinisher::new("true", 8000);
        let produced = ok.finish(Path::new("/tmp/scene_v1_rgb.png")).unwrap();
        assert_eq!(produced, vec![PathBuf::from("/tmp/scene_rgb.x8000.png")]);

        let failing = ImageMagickFinisher::new("false", 8000);
        assert!(matches!(
            failing.finish(Path::new("/tmp/scene_rgb.png")),
            Err(FinishError::Failed { step: "transparency", .. })
        ));
    }
}
