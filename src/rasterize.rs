//! External rasterizer invocation.
//!
//! The base document — page background images plus positioning CSS — comes
//! from `pdf2htmlEX`, consumed as a black-box process: it either writes the
//! base HTML to the output path or exits non-zero. The call is synchronous
//! and is never retried here; timeout and retry policy belong to the caller.

use std::path::Path;
use std::process::Command;

use crate::error::{Error, Result};

/// Options for one rasterizer invocation.
#[derive(Debug, Clone)]
pub struct RasterizeOptions {
    /// Program to invoke
    pub program: String,
    /// Zoom factor passed to the rasterizer; must match the zoom later used
    /// for widget positioning.
    pub zoom: f32,
    /// First page to convert (1-based), if limiting the range
    pub first_page: Option<usize>,
    /// Last page to convert (1-based), if limiting the range
    pub last_page: Option<usize>,
}

impl Default for RasterizeOptions {
    fn default() -> Self {
        Self {
            program: "pdf2htmlex".to_string(),
            zoom: 1.0,
            first_page: None,
            last_page: None,
        }
    }
}

/// Run the rasterizer over `input`, writing the base HTML to `output`.
///
/// Backgrounds are requested as SVG, DRM is ignored, and print styles are
/// disabled; the output is meant for further composition, not direct
/// viewing.
///
/// # Errors
///
/// [`Error::Io`] when the program cannot be spawned;
/// [`Error::ExternalConversionFailure`] with the exit status and captured
/// stderr when it exits non-zero.
pub fn rasterize(input: &Path, output: &Path, options: &RasterizeOptions) -> Result<()> {
    let mut cmd = Command::new(&options.program);
    cmd.arg("--zoom")
        .arg(options.zoom.to_string())
        .arg("--no-drm")
        .arg("1")
        .arg("--printing")
        .arg("0")
        .arg("--bg-format")
        .arg("svg");
    if let Some(first) = options.first_page {
        cmd.arg("--first-page").arg(first.to_string());
    }
    if let Some(last) = options.last_page {
        cmd.arg("--last-page").arg(last.to_string());
    }
    cmd.arg(input).arg(output);

    log::debug!("Invoking rasterizer: {:?}", cmd);
    let result = cmd.output()?;
    if !result.status.success() {
        return Err(Error::ExternalConversionFailure {
            status: result.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&result.stderr).into_owned(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_io_error() {
        let options = RasterizeOptions {
            program: "definitely-not-a-real-rasterizer".to_string(),
            ..Default::default()
        };
        let err = rasterize(Path::new("in.pdf"), Path::new("out.html"), &options).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_carries_status() {
        let options = RasterizeOptions {
            program: "false".to_string(),
            ..Default::default()
        };
        let err = rasterize(Path::new("in.pdf"), Path::new("out.html"), &options).unwrap_err();
        match err {
            Error::ExternalConversionFailure { status, .. } => assert_ne!(status, 0),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_exit_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let options = RasterizeOptions {
            program: "true".to_string(),
            first_page: Some(2),
            last_page: Some(3),
            ..Default::default()
        };
        rasterize(
            Path::new("in.pdf"),
            &dir.path().join("out.html"),
            &options,
        )
        .unwrap();
    }

    #[test]
    fn test_default_options() {
        let options = RasterizeOptions::default();
        assert_eq!(options.program, "pdf2htmlex");
        assert_eq!(options.zoom, 1.0);
        assert!(options.first_page.is_none());
    }
}
