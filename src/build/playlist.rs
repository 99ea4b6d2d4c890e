//! Playlist pass: one playlist per video manifest

use std::path::{Path, PathBuf};

use crate::config::BuilderConfig;
use crate::discovery::find_documents;
use crate::document::{write_document, Header, LoadedDocument, PlaylistManifest};
use crate::error::{BuildError, Result};

use super::{PassReport, MANIFEST_SUFFIX, PLAYLIST_SUFFIX};

/// Wrap a video manifest in `manifests/<title>_playlist.json`.
pub fn generate_playlist_from_manifest(
    manifest_path: &Path,
    config: &BuilderConfig,
) -> Result<PathBuf> {
    let manifest = LoadedDocument::read(manifest_path)?;

    let media_asset = manifest
        .value
        .get("media_asset")
        .ok_or_else(|| BuildError::missing_field(manifest_path, "media_asset"))?;
    if media_asset.get("video_mime_type").is_none() {
        return Err(BuildError::NotVideoManifest(manifest_path.to_path_buf()));
    }

    let asset = manifest.asset_ref(format!("./manifests/{}", manifest.file_name()))?;
    let header = Header::new(
        asset.name.clone(),
        format!("Playlist for {}", asset.name),
        config.created_by.clone(),
    );

    if header.name.is_empty() || header.name.contains(['/', '\\']) {
        return Err(BuildError::UnsafeTitle(header.name));
    }

    let out_path = config
        .manifest_dir
        .join(format!("{}{}", header.name, PLAYLIST_SUFFIX));
    let playlist = PlaylistManifest {
        header,
        media_assets: vec![asset],
    };
    write_document(&out_path, &playlist)?;
    Ok(out_path)
}

/// Wrap each of `manifests`, or every `*_video_manifest.json` in the
/// manifest folder when `None`.
pub fn generate_playlists(
    config: &BuilderConfig,
    manifests: Option<&[PathBuf]>,
) -> Result<PassReport> {
    let discovered;
    let manifests = match manifests {
        Some(paths) => paths,
        None => {
            discovered = find_documents(&config.manifest_dir, MANIFEST_SUFFIX)?;
            &discovered[..]
        }
    };

    let mut report = PassReport::new("playlists");
    for manifest_path in manifests {
        match generate_playlist_from_manifest(manifest_path, config) {
            Ok(out_path) => report.record_written(out_path),
            Err(e) => report.record_failure(manifest_path, &e),
        }
    }
    Ok(report)
}
