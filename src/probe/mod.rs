//! Media inspection
//!
//! This module handles metadata extraction for video files:
//! - Running the external inspector (`ffmpeg -i <path>`)
//! - Scraping codec, duration, resolution and frame rate from its stderr
//! - Deriving titles from the scraped fields

pub mod codec;
pub mod parse;
pub mod title;

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::InspectError;

pub use codec::Codec;
pub use parse::{parse_diagnostics, VideoDetails};
pub use title::derive_title;

/// Source of diagnostic text for a media file
pub trait MediaInspector {
    /// Return the inspector's diagnostic text for `path`.
    fn inspect(&self, path: &Path) -> Result<String, InspectError>;
}

/// Runs `ffmpeg -i <path>` and captures stderr
#[derive(Debug, Clone)]
pub struct FfmpegInspector {
    program: PathBuf,
}

impl FfmpegInspector {
    pub fn new<P: Into<PathBuf>>(program: P) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Default for FfmpegInspector {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl MediaInspector for FfmpegInspector {
    fn inspect(&self, path: &Path) -> Result<String, InspectError> {
        let program = self.program.display().to_string();
        let output = Command::new(&self.program)
            .arg("-i")
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| InspectError::Spawn {
                program: program.clone(),
                source,
            })?;

        // Without an output file ffmpeg always exits non-zero after printing
        // the input description, so the status alone is not a failure.
        if !output.status.success() {
            tracing::debug!("{} exited with {} for {}", program, output.status, path.display());
        }

        let text = String::from_utf8_lossy(&output.stderr).into_owned();
        if text.trim().is_empty() {
            return Err(InspectError::EmptyOutput {
                program,
                path: path.to_path_buf(),
            });
        }
        Ok(text)
    }
}

/// Inspect `path` and parse the result, degrading to all-unknown fields
/// when the inspector fails.
pub fn probe_video(inspector: &dyn MediaInspector, path: &Path) -> VideoDetails {
    match inspector.inspect(path) {
        Ok(text) => {
            let details = parse_diagnostics(&text);
            tracing::debug!(
                "Probed {}: codec={}, duration={:?}ms, resolution={:?}, fps={}",
                path.display(),
                details.codec,
                details.duration_ms,
                details.resolution,
                details.frame_rate
            );
            details
        }
        Err(e) => {
            tracing::warn!("Error getting video details for {}: {}", path.display(), e);
            VideoDetails::unknown()
        }
    }
}
