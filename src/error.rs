use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the test vector builder
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Input folder does not exist: {0}")]
    InputFolderMissing(PathBuf),

    #[error("Input folder must contain a media folder: {0}")]
    MediaFolderMissing(PathBuf),

    #[error("Cannot read folder: {0}")]
    PermissionDenied(PathBuf),

    #[error("Missing field '{field}' in {path}")]
    MissingField { path: PathBuf, field: String },

    #[error("Not a video manifest: {0}")]
    NotVideoManifest(PathBuf),

    #[error("Title is not usable as a file name: {0:?}")]
    UnsafeTitle(String),

    #[error("Path is not inside the input folder: {0}")]
    OutsideInputFolder(PathBuf),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// External media inspector errors
#[derive(Error, Debug)]
pub enum InspectError {
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} produced no diagnostic output for {path}")]
    EmptyOutput { program: String, path: PathBuf },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, BuildError>;

impl BuildError {
    /// Shorthand for a missing JSON key in a document on disk.
    pub fn missing_field(path: impl Into<PathBuf>, field: &str) -> Self {
        BuildError::MissingField {
            path: path.into(),
            field: field.to_string(),
        }
    }

    /// Whether this error must abort the whole run rather than one item.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            BuildError::InputFolderMissing(_)
                | BuildError::MediaFolderMissing(_)
                | BuildError::PermissionDenied(_)
                | BuildError::Config(_)
        )
    }
}
