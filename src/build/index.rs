//! Catalog index pass
//!
//! Overwrite mode writes a fresh index. Append mode loads the existing index
//! and upserts the new catalog entries by url, keeping every other entry.

use std::path::{Path, PathBuf};

use crate::config::BuilderConfig;
use crate::discovery::find_documents;
use crate::document::{
    read_document, write_document, CatalogAsset, CatalogIndex, CatalogSet, Header,
    LoadedDocument,
};
use crate::error::{BuildError, Result};

use super::{PassReport, CATALOG_SUFFIX};

/// JSON key that marks a document as a playlist catalog
const PLAYLISTS_KEY: &str = "playlists";

/// `*_catalog.json` files in the root that actually hold a `playlists` list.
pub fn find_catalogs(config: &BuilderConfig) -> Result<Vec<PathBuf>> {
    let candidates = find_documents(&config.input_folder, CATALOG_SUFFIX)?;
    Ok(candidates
        .into_iter()
        .filter(|path| match LoadedDocument::read(path) {
            Ok(doc) => doc.has_key(PLAYLISTS_KEY),
            Err(e) => {
                tracing::debug!("Not indexing {}: {}", path.display(), e);
                false
            }
        })
        .collect())
}

fn catalog_asset(path: &Path) -> Result<CatalogAsset> {
    let doc = LoadedDocument::read(path)?;
    if !doc.has_key(PLAYLISTS_KEY) {
        return Err(BuildError::missing_field(path, PLAYLISTS_KEY));
    }
    doc.asset_ref(format!("./{}", doc.file_name()))
}

/// Existing entries to merge into, or an empty set when starting fresh.
fn existing_entries(config: &BuilderConfig) -> CatalogSet {
    let path = config.index_path();
    if !config.append_index || !path.exists() {
        return CatalogSet::new();
    }
    match read_document::<CatalogIndex, _>(&path) {
        Ok(index) => {
            tracing::info!(
                "Appending to existing index with {} catalog(s)",
                index.catalogs.len()
            );
            index.catalogs
        }
        Err(e) => {
            tracing::warn!(
                "Could not read existing index {}, creating new: {}",
                path.display(),
                e
            );
            CatalogSet::new()
        }
    }
}

/// Write `<root>/vcat_testvector_catalog_index.json` referencing `catalogs`.
///
/// Nothing is written when no catalog could be read, so an append run never
/// rewrites the index without adding to it.
pub fn generate_index(config: &BuilderConfig, catalogs: &[PathBuf]) -> Result<PassReport> {
    let mut report = PassReport::new("catalog index");

    let mut assets = Vec::with_capacity(catalogs.len());
    for path in catalogs {
        match catalog_asset(path) {
            Ok(asset) => assets.push(asset),
            Err(e) => report.record_failure(path, &e),
        }
    }
    if assets.is_empty() {
        tracing::warn!("No catalog file to index");
        return Ok(report);
    }

    let mut entries = existing_entries(config);
    for asset in assets {
        if let Some(previous) = entries.upsert(asset) {
            tracing::debug!("Replaced index entry {}", previous.url);
        }
    }

    let index = CatalogIndex {
        header: Header::new(
            config.index_name.clone(),
            config.index_description.clone(),
            config.created_by.clone(),
        ),
        catalogs: entries,
    };
    let out_path = config.index_path();
    write_document(&out_path, &index)?;
    tracing::info!("Index lists {} catalog(s)", index.catalogs.len());
    report.record_written(out_path);
    Ok(report)
}
