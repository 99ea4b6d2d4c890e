//! Catalog pass: one catalog referencing every playlist

use std::path::PathBuf;

use crate::config::BuilderConfig;
use crate::discovery::find_documents;
use crate::document::{write_document, Header, LoadedDocument, PlaylistAsset, PlaylistCatalog};
use crate::error::Result;

use super::{PassReport, PLAYLIST_SUFFIX};

/// Write `<root>/<catalog filename>` referencing `playlists`.
///
/// Unreadable playlists are skipped and reported. With no playlists at all
/// nothing is written.
pub fn generate_catalog(config: &BuilderConfig, playlists: &[PathBuf]) -> Result<PassReport> {
    let mut report = PassReport::new("catalog");
    if playlists.is_empty() {
        tracing::warn!("No playlist files found, skipping catalog");
        return Ok(report);
    }

    let mut assets: Vec<PlaylistAsset> = Vec::with_capacity(playlists.len());
    for path in playlists {
        let asset = LoadedDocument::read(path)
            .and_then(|doc| doc.asset_ref(format!("./manifests/{}", doc.file_name())));
        match asset {
            Ok(asset) => assets.push(asset),
            Err(e) => report.record_failure(path, &e),
        }
    }

    let catalog = PlaylistCatalog {
        header: Header::new(
            config.catalog_name.clone(),
            config.description.clone(),
            config.created_by.clone(),
        ),
        playlists: assets,
    };
    let out_path = config.catalog_path();
    write_document(&out_path, &catalog)?;
    tracing::info!(
        "Catalog '{}' references {} playlist(s)",
        catalog.header.name,
        catalog.playlists.len()
    );
    report.record_written(out_path);
    Ok(report)
}

/// Catalog every `*_playlist.json` in the manifest folder.
pub fn generate_catalog_from_dir(config: &BuilderConfig) -> Result<PassReport> {
    let playlists = find_documents(&config.manifest_dir, PLAYLIST_SUFFIX)?;
    generate_catalog(config, &playlists)
}
