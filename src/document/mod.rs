//! Test vector documents
//!
//! Every document is a JSON object with a `vcat_testvector_header` envelope:
//! - Video manifest: one media asset
//! - Playlist manifest: one reference to a video manifest
//! - Playlist catalog: references to playlists
//! - Catalog index: references to catalogs, keyed by url

pub mod catalog_set;
pub mod header;

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::digest;
use crate::error::{BuildError, Result};

pub use catalog_set::CatalogSet;
pub use header::Header;

/// JSON key of the shared header
pub const HEADER_KEY: &str = "vcat_testvector_header";

/// A video file described by a manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoAsset {
    /// File name of the video
    pub name: String,
    /// Path from the manifest to the video
    pub url: String,
    pub checksum: String,
    pub length_bytes: u64,
    pub video_mime_type: String,
    pub duration_ms: Option<u64>,
    pub resolution_x_y: Option<String>,
    pub frame_rate: String,
}

/// Reference from a parent document to a child document.
///
/// `checksum` and `length_bytes` describe the child's bytes at generation
/// time; `name`, `uuid` and `description` are copied from the child's header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRef {
    pub name: String,
    pub url: String,
    pub checksum: String,
    pub length_bytes: u64,
    pub uuid: String,
    pub description: String,
}

/// Playlist entry pointing at a video manifest (or, in a catalog, at a playlist)
pub type PlaylistAsset = AssetRef;

/// Index entry pointing at a catalog
pub type CatalogAsset = AssetRef;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoManifest {
    #[serde(rename = "vcat_testvector_header")]
    pub header: Header,
    pub media_asset: VideoAsset,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistManifest {
    #[serde(rename = "vcat_testvector_header")]
    pub header: Header,
    pub media_assets: Vec<PlaylistAsset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistCatalog {
    #[serde(rename = "vcat_testvector_header")]
    pub header: Header,
    pub playlists: Vec<PlaylistAsset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogIndex {
    #[serde(rename = "vcat_testvector_header")]
    pub header: Header,
    pub catalogs: CatalogSet,
}

/// A JSON document read from disk, kept as raw bytes plus parsed tree so
/// that checksums are taken over exactly what was parsed.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
    pub value: Value,
}

/// Identifying header fields of a referenced document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderFields {
    pub name: String,
    pub description: String,
    pub uuid: String,
}

impl LoadedDocument {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let bytes = std::fs::read(&path)?;
        let value = serde_json::from_slice(&bytes)?;
        Ok(Self { path, bytes, value })
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.value.get(key).is_some()
    }

    /// Pull name, description and uuid out of the embedded header.
    pub fn header_fields(&self) -> Result<HeaderFields> {
        let header = self
            .value
            .get(HEADER_KEY)
            .filter(|h| h.is_object())
            .ok_or_else(|| BuildError::missing_field(&self.path, HEADER_KEY))?;
        let field = |key: &str| -> Result<String> {
            header
                .get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| {
                    BuildError::missing_field(&self.path, &format!("{}.{}", HEADER_KEY, key))
                })
        };
        Ok(HeaderFields {
            name: field("name")?,
            description: field("description")?,
            uuid: field("uuid")?,
        })
    }

    /// Build a reference to this document as seen from `url`.
    pub fn asset_ref(&self, url: String) -> Result<AssetRef> {
        let fields = self.header_fields()?;
        Ok(AssetRef {
            name: fields.name,
            url,
            checksum: digest::sha256_hex(&self.bytes),
            length_bytes: self.bytes.len() as u64,
            uuid: fields.uuid,
            description: fields.description,
        })
    }

    pub fn file_name(&self) -> String {
        file_name_of(&self.path)
    }
}

pub(crate) fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Serialize `doc` as two-space indented JSON and write it to `path`.
///
/// The document is rendered fully in memory, written to a sibling temporary
/// file and renamed over `path`.
pub fn write_document<T: Serialize, P: AsRef<Path>>(path: P, doc: &T) -> Result<()> {
    let path = path.as_ref();
    let bytes = serde_json::to_vec_pretty(doc)?;

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let written = std::fs::File::create(&tmp_path).and_then(|mut file| {
        file.write_all(&bytes)?;
        file.sync_all()
    });
    if let Err(e) = written.and_then(|_| std::fs::rename(&tmp_path, path)) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    tracing::debug!("Wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

/// Read and parse a typed document.
pub fn read_document<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let bytes = std::fs::read(path.as_ref())?;
    Ok(serde_json::from_slice(&bytes)?)
}
