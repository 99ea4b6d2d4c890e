//! Configuration file support
//!
//! Loads builder defaults from TOML files.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::error::{BuildError, Result};

/// Config file looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "vcat.toml";

/// Configuration file format
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Folder settings
    pub paths: Option<PathSettings>,
    /// Catalog settings
    pub catalog: Option<CatalogSettings>,
    /// Header metadata defaults
    pub metadata: Option<MetadataSettings>,
    /// External tools
    pub tools: Option<ToolSettings>,
    /// Logging settings
    pub logging: Option<LoggingSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    /// Input/output root holding `media/`
    pub base_output_dir: Option<PathBuf>,
    /// Manifest subdirectory name
    pub manifest_dir_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Catalog output file name
    pub filename: Option<String>,
    /// Catalog description
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataSettings {
    /// Attribution written into every header
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSettings {
    /// Path or name of the ffmpeg binary
    pub ffmpeg: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty)
    pub format: Option<String>,
}

impl ConfigFile {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| BuildError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| BuildError::Config(e.to_string()))?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }

    /// Generate default configuration file
    pub fn default_config() -> Self {
        let settings = Settings::default();
        Self {
            paths: Some(PathSettings {
                base_output_dir: Some(settings.base_output_dir),
                manifest_dir_name: Some(settings.manifest_dir_name),
            }),
            catalog: Some(CatalogSettings {
                filename: Some(settings.catalog_filename),
                description: Some(settings.catalog_description),
            }),
            metadata: Some(MetadataSettings {
                created_by: Some(settings.created_by),
            }),
            tools: Some(ToolSettings {
                ffmpeg: Some(settings.ffmpeg),
            }),
            logging: Some(LoggingSettings {
                level: "info".to_string(),
                format: Some("pretty".to_string()),
            }),
        }
    }

    /// Merge over the built-in defaults
    pub fn into_settings(self) -> Settings {
        let mut settings = Settings::default();
        if let Some(paths) = self.paths {
            if let Some(dir) = paths.base_output_dir {
                settings.base_output_dir = dir;
            }
            if let Some(name) = paths.manifest_dir_name {
                settings.manifest_dir_name = name;
            }
        }
        if let Some(catalog) = self.catalog {
            if let Some(filename) = catalog.filename {
                settings.catalog_filename = filename;
            }
            if let Some(description) = catalog.description {
                settings.catalog_description = description;
            }
        }
        if let Some(created_by) = self.metadata.and_then(|m| m.created_by) {
            settings.created_by = created_by;
        }
        if let Some(ffmpeg) = self.tools.and_then(|t| t.ffmpeg) {
            settings.ffmpeg = ffmpeg;
        }
        settings
    }
}

/// Load the explicit config file, else `vcat.toml` if present, else defaults.
pub fn load(explicit: Option<&Path>) -> Result<ConfigFile> {
    match explicit {
        Some(path) => ConfigFile::from_file(path),
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
            ConfigFile::from_file(DEFAULT_CONFIG_FILE)
        }
        None => Ok(ConfigFile::default()),
    }
}

/// Generate default configuration file at the specified path
pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    let config = ConfigFile::default_config();
    config.to_file(path)?;
    Ok(())
}
