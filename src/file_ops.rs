use serde::Serialize;
use std::fs::{create_dir_all, read_dir, remove_file};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::DESCRIPTOR_FILE_NAME;
use crate::error::OutputError;

pub const MANIFEST_PREFIX: &str = "category-";
pub const MANIFEST_SUFFIX: &str = ".json";

/// Every `metadata.json` below `root`, in traversal order. A missing root is
/// an empty result, not an error.
pub fn locate_descriptors(root: &Path) -> Vec<PathBuf> {
    if !root.exists() {
        debug!(root = %root.display(), "metadata root does not exist");
        return Vec::new();
    }

    let mut found = Vec::new();
    // follow_links makes walkdir report symlink loops as errors instead of spinning.
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("skipping unreadable entry under {}: {}", root.display(), err);
                continue;
            }
        };
        if entry.file_type().is_file() && entry.file_name() == DESCRIPTOR_FILE_NAME {
            found.push(entry.into_path());
        }
    }
    found
}

/// Directory containing `path` with forward slashes.
pub fn normalized_parent(path: &Path) -> String {
    path.parent()
        .map(|p| p.to_string_lossy().replace('\\', "/"))
        .unwrap_or_default()
}

pub fn ensure_dir(dir: &Path) -> Result<(), OutputError> {
    create_dir_all(dir).map_err(|source| OutputError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Pretty JSON with two-space indentation and a trailing newline.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), OutputError> {
    let mut body = serde_json::to_string_pretty(value).map_err(|source| OutputError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;
    body.push('\n');
    std::fs::write(path, body).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })
}

pub fn is_manifest_file_name(name: &str) -> bool {
    name.starts_with(MANIFEST_PREFIX) && name.ends_with(MANIFEST_SUFFIX)
}

/// Entry names in `dir` that look like category manifests, sorted. An
/// unreadable entry is logged and left out.
pub fn list_manifest_files(dir: &Path) -> Result<Vec<String>, OutputError> {
    let entries = read_dir(dir).map_err(|source| OutputError::List {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("skipping unreadable entry in {}: {}", dir.display(), err);
                continue;
            }
        };
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if is_manifest_file_name(&name) {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

pub fn remove_output_file(path: &Path) -> Result<(), OutputError> {
    remove_file(path).map_err(|source| OutputError::Remove {
        path: path.to_path_buf(),
        source,
    })
}
