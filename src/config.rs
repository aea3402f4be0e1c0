use std::path::PathBuf;

/// File name every app directory uses for its descriptor.
pub const DESCRIPTOR_FILE_NAME: &str = "metadata.json";

pub const ROOT_VAR: &str = "APPS_FOLDER";
pub const OUTPUT_DIR_VAR: &str = "RELEASES_FOLDER";
pub const CATEGORIES_FILE_VAR: &str = "CATEGORIES_FILE";

pub const DEFAULT_ROOT: &str = "apps";
pub const DEFAULT_OUTPUT_DIR: &str = "releases";
pub const DEFAULT_CATEGORIES_FILE: &str = "valid-categories.json";

/// Resolved locations for a single run.
#[derive(Debug, Clone)]
pub struct Config {
    pub root: PathBuf,
    pub output_dir: PathBuf,
    pub categories_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            categories_file: PathBuf::from(DEFAULT_CATEGORIES_FILE),
        }
    }
}
