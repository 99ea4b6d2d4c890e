//! Document generation passes
//!
//! Four passes, each reading what the previous one wrote to disk:
//! - Video manifests from discovered media files
//! - Playlists wrapping each manifest
//! - A catalog of playlists
//! - A catalog index, optionally merged with an existing one

pub mod catalog;
pub mod index;
pub mod manifest;
pub mod pipeline;
pub mod playlist;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::BuildError;

pub use catalog::{generate_catalog, generate_catalog_from_dir};
pub use index::{find_catalogs, generate_index};
pub use manifest::{generate_manifests, generate_video_manifest};
pub use pipeline::{build, run_pass, BuildSummary, Pass};
pub use playlist::{generate_playlist_from_manifest, generate_playlists};

/// File name suffixes each pass looks for
pub const MANIFEST_SUFFIX: &str = "_video_manifest.json";
pub const PLAYLIST_SUFFIX: &str = "_playlist.json";
pub const CATALOG_SUFFIX: &str = "_catalog.json";

/// Outcome of one pass: files written and items skipped
#[derive(Debug, Default)]
pub struct PassReport {
    pub pass: &'static str,
    pub written: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

impl PassReport {
    pub fn new(pass: &'static str) -> Self {
        Self {
            pass,
            ..Default::default()
        }
    }

    /// Record an output file. A path already recorded in this pass was
    /// overwritten by a later item and is not listed twice.
    pub fn record_written(&mut self, path: PathBuf) {
        if self.written.contains(&path) {
            tracing::warn!("  ↻ {} overwritten", display_name(&path));
            return;
        }
        tracing::info!("  ✔ {}", display_name(&path));
        self.written.push(path);
    }

    pub fn record_failure(&mut self, item: &Path, error: &BuildError) {
        tracing::warn!("  ✗ {}: {}", display_name(item), error);
        self.failed.push((item.to_path_buf(), error.to_string()));
    }

    pub fn succeeded(&self) -> usize {
        self.written.len()
    }

    pub fn failures(&self) -> usize {
        self.failed.len()
    }
}

impl fmt::Display for PassReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} written, {} failed",
            self.pass,
            self.succeeded(),
            self.failures()
        )
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// `../<path relative to root>` with forward slashes
pub(crate) fn relative_url(prefix: &str, root: &Path, path: &Path) -> Result<String, BuildError> {
    let rel = path
        .strip_prefix(root)
        .map_err(|_| BuildError::OutsideInputFolder(path.to_path_buf()))?;
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(format!("{}{}", prefix, parts.join("/")))
}
