//! Media file and document discovery

use std::io;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::error::{BuildError, Result};

/// OS artifacts skipped at every depth
pub const IGNORED_NAMES: [&str; 2] = [".DS_Store", "__MACOSX"];

fn is_ignored(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| IGNORED_NAMES.contains(&name))
        .unwrap_or(false)
}

/// Recursively list every file below `root`, skipping OS artifacts and
/// anything inside an ignored directory.
///
/// Callers must not rely on the order of the result.
pub fn discover_media_files<P: AsRef<Path>>(root: P) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();
    match std::fs::read_dir(root) {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(BuildError::MediaFolderMissing(root.to_path_buf()))
        }
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            return Err(BuildError::PermissionDenied(root.to_path_buf()))
        }
        Err(e) => return Err(e.into()),
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_ignored(entry));

    for entry in walker {
        match entry {
            Ok(entry) if entry.file_type().is_file() => files.push(entry.into_path()),
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("Skipping unreadable entry below {}: {}", root.display(), e);
            }
        }
    }

    tracing::debug!("Discovered {} file(s) below {}", files.len(), root.display());
    Ok(files)
}

/// Non-recursive listing of regular files in `dir` whose name ends with
/// `suffix`, sorted by path.
pub fn find_documents<P: AsRef<Path>>(dir: P, suffix: &str) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for entry in std::fs::read_dir(dir.as_ref())? {
        let entry = entry?;
        let path = entry.path();
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.ends_with(suffix))
            .unwrap_or(false);
        if matches && path.is_file() {
            found.push(path);
        }
    }
    found.sort();
    Ok(found)
}
