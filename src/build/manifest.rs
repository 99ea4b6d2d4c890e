//! Video manifest pass

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::BuilderConfig;
use crate::digest;
use crate::discovery::discover_media_files;
use crate::document::{file_name_of, write_document, Header, VideoAsset, VideoManifest};
use crate::error::Result;
use crate::probe::{derive_title, probe_video, MediaInspector, VideoDetails};

use super::{relative_url, PassReport, MANIFEST_SUFFIX};

/// Describe one video file and write `manifests/<file name>_video_manifest.json`.
///
/// Returns the manifest path and its title.
pub fn generate_video_manifest(
    video_path: &Path,
    config: &BuilderConfig,
    inspector: &dyn MediaInspector,
) -> Result<(PathBuf, String)> {
    let checksum = digest::checksum_file(video_path)?;
    let length_bytes = digest::file_length(video_path)?;
    let url = relative_url("../", &config.input_folder, video_path)?;
    let details = probe_video(inspector, video_path);

    let title = derive_title(
        video_path,
        details.mime_type(),
        details.resolution.as_deref(),
        &details.frame_rate,
    );
    let header = Header::new(title.clone(), describe(&details), config.created_by.clone());

    let name = file_name_of(video_path);
    let manifest = VideoManifest {
        header,
        media_asset: VideoAsset {
            name: name.clone(),
            url,
            checksum,
            length_bytes,
            video_mime_type: details.mime_type().to_string(),
            duration_ms: details.duration_ms,
            resolution_x_y: details.resolution,
            frame_rate: details.frame_rate,
        },
    };

    let out_path = config.manifest_dir.join(format!("{}{}", name, MANIFEST_SUFFIX));
    write_document(&out_path, &manifest)?;
    Ok((out_path, title))
}

/// `VCAT Test asset: <mime>, <res>, <fps>fps, <dur>ms`
fn describe(details: &VideoDetails) -> String {
    let duration = details
        .duration_ms
        .map(|ms| ms.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    format!(
        "VCAT Test asset: {}, {}, {}fps, {}ms",
        details.mime_type(),
        details.resolution.as_deref().unwrap_or("unknown"),
        details.frame_rate,
        duration
    )
}

/// Discover every file under the media folder and write a manifest for each.
///
/// A missing or unreadable media folder is fatal; a bad file is skipped.
pub fn generate_manifests(
    config: &BuilderConfig,
    inspector: &dyn MediaInspector,
) -> Result<PassReport> {
    let video_files = discover_media_files(config.media_folder())?;
    tracing::info!("Found {} video file(s)", video_files.len());
    std::fs::create_dir_all(&config.manifest_dir)?;

    let mut report = PassReport::new("video manifests");
    let mut titles: HashMap<String, PathBuf> = HashMap::new();

    for video_path in &video_files {
        match generate_video_manifest(video_path, config, inspector) {
            Ok((out_path, title)) => {
                if let Some(previous) = titles.insert(title.clone(), video_path.clone()) {
                    tracing::warn!(
                        "{} and {} share the title '{}'; their playlists will collide",
                        previous.display(),
                        video_path.display(),
                        title
                    );
                }
                report.record_written(out_path);
            }
            Err(e) => report.record_failure(video_path, &e),
        }
    }
    Ok(report)
}
