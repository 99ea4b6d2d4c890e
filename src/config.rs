//! Builder configuration
//!
//! `Settings` holds the named defaults (optionally loaded from a TOML file),
//! `BuilderConfig` is the resolved value handed to every pass.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BuildError, Result};

/// Default catalog file name
pub const DEFAULT_CATALOG_FILENAME: &str = "vcat_testvector_playlist_catalog.json";

/// Default catalog description
pub const DEFAULT_CATALOG_DESCRIPTION: &str = "VCAT test vector playlist catalog";

/// Default attribution string
pub const DEFAULT_CREATED_BY: &str = "RoncaTech, LLC";

/// Catalog index file name, always written next to the catalogs
pub const INDEX_FILENAME: &str = "vcat_testvector_catalog_index.json";

pub const INDEX_NAME: &str = "VCAT Test Vector Catalog Index";
pub const INDEX_DESCRIPTION: &str = "Index of all VCAT test vector catalogs";

/// Named defaults, overridable from a config file and then from the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Input/output root holding `media/`
    pub base_output_dir: PathBuf,

    /// Manifest subdirectory name below the root
    pub manifest_dir_name: String,

    /// Catalog file name when no codec filter is given
    pub catalog_filename: String,

    /// Catalog description
    pub catalog_description: String,

    /// Attribution written into every header
    pub created_by: String,

    /// Media inspection program
    pub ffmpeg: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            base_output_dir: home.join("Downloads").join("vcat_test_vectors"),
            manifest_dir_name: "manifests".to_string(),
            catalog_filename: DEFAULT_CATALOG_FILENAME.to_string(),
            catalog_description: DEFAULT_CATALOG_DESCRIPTION.to_string(),
            created_by: DEFAULT_CREATED_BY.to_string(),
            ffmpeg: PathBuf::from("ffmpeg"),
        }
    }
}

/// Per-run overrides, usually straight from the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub input_folder: Option<PathBuf>,
    pub created_by: Option<String>,
    pub catalog_filename: Option<String>,
    pub description: Option<String>,
    pub codec: Option<String>,
    pub append_index: bool,
    pub ffmpeg: Option<PathBuf>,
}

/// Resolved configuration for one run
#[derive(Debug, Clone)]
pub struct BuilderConfig {
    /// Root folder; every output lands here so relative urls resolve
    pub input_folder: PathBuf,
    pub manifest_dir: PathBuf,
    pub created_by: String,
    pub codec: Option<String>,
    pub append_index: bool,
    pub catalog_filename: String,
    pub catalog_name: String,
    pub description: String,
    pub index_filename: String,
    pub index_name: String,
    pub index_description: String,
    pub ffmpeg: PathBuf,
}

impl BuilderConfig {
    /// Resolve settings and overrides into a run configuration.
    pub fn resolve(settings: &Settings, overrides: Overrides) -> Result<Self> {
        if let Some(codec) = &overrides.codec {
            validate_codec(codec)?;
        }

        let input_folder = expand_home(
            overrides
                .input_folder
                .as_deref()
                .unwrap_or(&settings.base_output_dir),
        );
        let input_folder = std::path::absolute(&input_folder).unwrap_or(input_folder);

        let catalog_filename = match (&overrides.catalog_filename, &overrides.codec) {
            (Some(name), _) => name.clone(),
            (None, Some(codec)) => codec_catalog_filename(codec),
            (None, None) => settings.catalog_filename.clone(),
        };
        if catalog_filename.contains(['/', '\\']) {
            return Err(BuildError::Config(format!(
                "catalog filename must not contain a path separator: {}",
                catalog_filename
            )));
        }

        let catalog_name = match &overrides.codec {
            Some(codec) => format!("VCAT {} Testvector Playlist Catalog", codec.to_uppercase()),
            None => catalog_name_from_filename(&catalog_filename),
        };

        Ok(Self {
            manifest_dir: input_folder.join(&settings.manifest_dir_name),
            input_folder,
            created_by: overrides
                .created_by
                .unwrap_or_else(|| settings.created_by.clone()),
            codec: overrides.codec,
            append_index: overrides.append_index,
            catalog_filename,
            catalog_name,
            description: overrides
                .description
                .unwrap_or_else(|| settings.catalog_description.clone()),
            index_filename: INDEX_FILENAME.to_string(),
            index_name: INDEX_NAME.to_string(),
            index_description: INDEX_DESCRIPTION.to_string(),
            ffmpeg: overrides
                .ffmpeg
                .unwrap_or_else(|| expand_home(&settings.ffmpeg)),
        })
    }

    /// Configuration rooted at `input_folder` with default settings.
    pub fn for_folder<P: AsRef<Path>>(input_folder: P) -> Result<Self> {
        Self::resolve(
            &Settings::default(),
            Overrides {
                input_folder: Some(input_folder.as_ref().to_path_buf()),
                ..Default::default()
            },
        )
    }

    /// Folder scanned for videos, narrowed to `media/<codec>` by a codec filter
    pub fn media_folder(&self) -> PathBuf {
        let media = self.input_folder.join("media");
        match &self.codec {
            Some(codec) => media.join(codec),
            None => media,
        }
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.input_folder.join(&self.catalog_filename)
    }

    pub fn index_path(&self) -> PathBuf {
        self.input_folder.join(&self.index_filename)
    }

    /// Fail fast on a missing root or media folder.
    pub fn validate_input(&self) -> Result<()> {
        if !self.input_folder.is_dir() {
            return Err(BuildError::InputFolderMissing(self.input_folder.clone()));
        }
        let media = self.media_folder();
        if !media.is_dir() {
            return Err(BuildError::MediaFolderMissing(media));
        }
        Ok(())
    }
}

/// `vcat_<codec>_testvector_playlist_catalog.json`
pub fn codec_catalog_filename(codec: &str) -> String {
    format!("vcat_{}_testvector_playlist_catalog.json", codec)
}

/// Derive a display name from a catalog file name:
/// `vcat_testvector_playlist_catalog.json` -> `Vcat Testvector Playlist Catalog`.
pub fn catalog_name_from_filename(filename: &str) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    title_case(&stem.replace('_', " "))
}

// Uppercase the first letter of every alphabetic run, lowercase the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

fn validate_codec(codec: &str) -> Result<()> {
    let mut components = Path::new(codec).components();
    let single_normal = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if codec.is_empty() || !single_normal || codec.contains(['/', '\\']) {
        return Err(BuildError::Config(format!(
            "codec must be a single folder name below media/: {:?}",
            codec
        )));
    }
    Ok(())
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}
