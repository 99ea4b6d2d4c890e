//! Full build: manifests, playlists, catalog and index in one run

use std::fmt;
use std::path::PathBuf;

use crate::config::BuilderConfig;
use crate::error::{BuildError, Result};
use crate::probe::MediaInspector;

use super::{
    find_catalogs, generate_catalog, generate_catalog_from_dir, generate_index,
    generate_manifests, generate_playlists, PassReport,
};

/// A single pass run on its own against what is already on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Manifests,
    Playlists,
    Catalog,
    Index,
}

/// Reports from every pass of a full build
#[derive(Debug)]
pub struct BuildSummary {
    pub manifests: PassReport,
    pub playlists: PassReport,
    pub catalog: PassReport,
    pub index: PassReport,
}

impl BuildSummary {
    pub fn catalog_path(&self) -> Option<&PathBuf> {
        self.catalog.written.first()
    }

    pub fn index_path(&self) -> Option<&PathBuf> {
        self.index.written.first()
    }

    pub fn failures(&self) -> usize {
        self.reports().iter().map(|r| r.failures()).sum()
    }

    pub fn reports(&self) -> [&PassReport; 4] {
        [&self.manifests, &self.playlists, &self.catalog, &self.index]
    }
}

impl fmt::Display for BuildSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Video manifests: {}", self.manifests.succeeded())?;
        writeln!(f, "Playlists: {}", self.playlists.succeeded())?;
        match self.catalog_path() {
            Some(path) => writeln!(f, "Catalog: {}", path.display())?,
            None => writeln!(f, "Catalog: none")?,
        }
        match self.index_path() {
            Some(path) => write!(f, "Index: {}", path.display()),
            None => write!(f, "Index: none"),
        }
    }
}

/// Run all four passes. Each pass consumes only what the previous pass of
/// this run wrote.
pub fn build(config: &BuilderConfig, inspector: &dyn MediaInspector) -> Result<BuildSummary> {
    config.validate_input()?;
    std::fs::create_dir_all(&config.manifest_dir)?;
    tracing::info!("Building from: {}", config.input_folder.display());

    tracing::info!("Step 1: Generating video manifests...");
    let manifests = generate_manifests(config, inspector)?;

    tracing::info!("Step 2: Generating playlists...");
    let playlists = generate_playlists(config, Some(&manifests.written))?;

    tracing::info!("Step 3: Generating catalog...");
    let catalog = generate_catalog(config, &playlists.written)?;

    tracing::info!("Step 4: Generating catalog index...");
    let index = generate_index(config, &catalog.written)?;

    let summary = BuildSummary {
        manifests,
        playlists,
        catalog,
        index,
    };
    for report in summary.reports() {
        tracing::info!("{}", report);
    }
    Ok(summary)
}

/// Run one pass over the documents currently on disk.
pub fn run_pass(
    pass: Pass,
    config: &BuilderConfig,
    inspector: &dyn MediaInspector,
) -> Result<PassReport> {
    if !config.input_folder.is_dir() {
        return Err(BuildError::InputFolderMissing(config.input_folder.clone()));
    }
    let report = match pass {
        Pass::Manifests => {
            config.validate_input()?;
            generate_manifests(config, inspector)?
        }
        Pass::Playlists => generate_playlists(config, None)?,
        Pass::Catalog => generate_catalog_from_dir(config)?,
        Pass::Index => {
            let catalogs = find_catalogs(config)?;
            tracing::info!("Found {} catalog(s)", catalogs.len());
            generate_index(config, &catalogs)?
        }
    };
    tracing::info!("{}", report);
    Ok(report)
}
